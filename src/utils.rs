use hashbrown::HashMap;
use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use petgraph::graphmap::DiGraphMap;

use super::{GeomModel, GeometryObject, JointModel, JointType, Model, Shape};

pub(super) fn is_urdf_file(path: &str) -> bool {
    path.ends_with(".urdf") || path.ends_with(".URDF")
}

// One entry per link, paired with the joint whose child it is.
// The entry index is the link id used by the graph and the BFS.
pub(super) struct LinkEntry {
    pub joint: Option<urdf_rs::Joint>,
    pub link: urdf_rs::Link,
}

pub(super) fn link_entries(robot: urdf_rs::Robot) -> Vec<LinkEntry> {
    let urdf_rs::Robot { links, joints, .. } = robot;
    links
        .into_iter()
        .map(|link| {
            let joint = joints.iter().find(|j| j.child.link == link.name).cloned();
            LinkEntry { joint, link }
        })
        .collect()
}

// The root link is the one no joint points at.
pub(super) fn root_link(entries: &[LinkEntry]) -> Option<usize> {
    entries.iter().position(|e| e.joint.is_none())
}

fn link_ids_by_name(entries: &[LinkEntry]) -> HashMap<&str, usize> {
    entries
        .iter()
        .enumerate()
        .map(|(id, e)| (e.link.name.as_str(), id))
        .collect()
}

// link_id -> link_id digraph of the kinematic tree, one edge per joint
pub(super) fn construct_link_graph(entries: &[LinkEntry]) -> DiGraphMap<usize, ()> {
    let ids = link_ids_by_name(entries);

    let mut graph = DiGraphMap::<usize, ()>::new();
    for id in 0..entries.len() {
        graph.add_node(id);
    }
    for (id, entry) in entries.iter().enumerate() {
        if let Some(joint) = &entry.joint {
            if let Some(&parent_id) = ids.get(joint.parent.link.as_str()) {
                graph.add_edge(parent_id, id, ());
            }
        }
    }
    graph
}

// Build the joint and geometry models from the links in BFS order, so
// every parent joint gets its internal index before its children and
// geometry indices come out grouped per joint.
pub(super) fn build_models(entries: &[LinkEntry], order: &[usize]) -> (Model, GeomModel) {
    let ids = link_ids_by_name(entries);

    // internal joint index carried by each link's body
    let mut joint_of_link = vec![usize::MAX; entries.len()];
    let mut joints = Vec::with_capacity(order.len());

    for &link_id in order {
        let entry = &entries[link_id];
        match &entry.joint {
            // the root link is fixed to the universe joint, index 0
            None => {
                joint_of_link[link_id] = 0;
                joints.push(universe_joint(&entry.link.name));
            }
            Some(joint) => {
                let parent_id = ids[joint.parent.link.as_str()];
                joint_of_link[link_id] = joints.len();
                joints.push(JointModel {
                    name: joint.name.clone(),
                    joint_type: joint_type(&joint.joint_type),
                    parent: joint_of_link[parent_id],
                    placement: pose_to_isometry(&joint.origin),
                    position_bounds: (joint.limit.lower, joint.limit.upper),
                    child_link: entry.link.name.clone(),
                });
            }
        }
    }

    let mut objects = Vec::new();
    let mut inner = vec![Vec::new(); joints.len()];
    for &link_id in order {
        let entry = &entries[link_id];
        let jindex = joint_of_link[link_id];
        for (k, collision) in entry.link.collision.iter().enumerate() {
            inner[jindex].push(objects.len());
            objects.push(GeometryObject {
                name: collision
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{}_collision_{}", entry.link.name, k)),
                parent_joint: jindex,
                placement: pose_to_isometry(&collision.origin),
                shape: shape_from_geometry(&collision.geometry),
            });
        }
    }
    let outer = outer_objects(&joints, &objects);

    (
        Model { joints },
        GeomModel {
            objects,
            inner,
            outer,
        },
    )
}

fn universe_joint(root_link: &str) -> JointModel {
    JointModel {
        name: "universe".to_string(),
        joint_type: JointType::Fixed,
        parent: 0,
        placement: Isometry3::identity(),
        position_bounds: (0.0, 0.0),
        child_link: root_link.to_string(),
    }
}

// Bodies adjacent in the kinematic tree are never collision candidates
// for each other; every other body's geometries are outer objects.
pub(super) fn outer_objects(joints: &[JointModel], objects: &[GeometryObject]) -> Vec<Vec<usize>> {
    (0..joints.len())
        .map(|j| {
            objects
                .iter()
                .enumerate()
                .filter(|(_, object)| {
                    let p = object.parent_joint;
                    p != j && joints[j].parent != p && joints[p].parent != j
                })
                .map(|(index, _)| index)
                .collect()
        })
        .collect()
}

pub(super) fn joint_type(joint_type: &urdf_rs::JointType) -> JointType {
    match joint_type {
        urdf_rs::JointType::Revolute => JointType::Revolute,
        urdf_rs::JointType::Continuous => JointType::Continuous,
        urdf_rs::JointType::Prismatic => JointType::Prismatic,
        urdf_rs::JointType::Fixed => JointType::Fixed,
        urdf_rs::JointType::Floating => JointType::Floating,
        urdf_rs::JointType::Planar => JointType::Planar,
        urdf_rs::JointType::Spherical => JointType::Spherical,
    }
}

pub(super) fn pose_to_isometry(pose: &urdf_rs::Pose) -> Isometry3<f64> {
    let [roll, pitch, yaw] = pose.rpy.0;
    let [x, y, z] = pose.xyz.0;
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

pub(super) fn shape_from_geometry(geometry: &urdf_rs::Geometry) -> Shape {
    match geometry {
        urdf_rs::Geometry::Box { size } => Shape::Box { size: size.0 },
        urdf_rs::Geometry::Cylinder { radius, length } => Shape::Cylinder {
            radius: *radius,
            length: *length,
        },
        urdf_rs::Geometry::Capsule { radius, length } => Shape::Capsule {
            radius: *radius,
            length: *length,
        },
        urdf_rs::Geometry::Sphere { radius } => Shape::Sphere { radius: *radius },
        urdf_rs::Geometry::Mesh { filename, scale } => Shape::Mesh {
            filename: filename.clone(),
            scale: scale.as_ref().map(|s| s.0).unwrap_or([1.0; 3]),
        },
    }
}

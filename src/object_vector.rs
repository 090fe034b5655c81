use super::joint::{Joint, JointMut};
use super::object::{CollisionObject, InOut};
use super::Device;

/// Indexed view over every collision geometry of a device, in the
/// global geometry index space `0..len()`.
///
/// The view stores nothing but the device borrow: `len` re-reads the
/// device's current count on every call and `at` builds a fresh
/// handle each time.
#[derive(Debug, Clone, Copy)]
pub struct DeviceObjectVector<'a> {
    device: &'a Device,
}

impl<'a> DeviceObjectVector<'a> {
    pub(crate) fn new(device: &'a Device) -> Self {
        Self { device }
    }

    pub fn len(&self) -> usize {
        self.device.ngeoms()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Caller contract: `i < len()`. Checked in debug builds only.
    pub fn at(&self, i: usize) -> CollisionObject<'a> {
        self.self_assert(i);
        CollisionObject::new(self.device, i)
    }

    pub fn iter(&self) -> impl Iterator<Item = CollisionObject<'a>> + 'a {
        let device = self.device;
        (0..self.len()).map(move |i| CollisionObject::new(device, i))
    }

    fn self_assert(&self, i: usize) {
        debug_assert!(i < self.len());
    }
}

/// Indexed view over the geometries of one joint, restricted to its
/// inner or outer set.
///
/// Indices live in the per-joint space `0..len()` of the selected
/// mode; the two modes have independent counts and their indices are
/// not interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct ObjectVector<'a> {
    device: &'a Device,
    joint_index: usize,
    in_out: InOut,
}

impl<'a> ObjectVector<'a> {
    pub(crate) fn new(device: &'a Device, joint_index: usize, in_out: InOut) -> Self {
        Self {
            device,
            joint_index,
            in_out,
        }
    }

    /// Internal index of the scoping joint.
    pub fn joint_index(&self) -> usize {
        self.joint_index
    }

    pub fn in_out(&self) -> InOut {
        self.in_out
    }

    pub fn len(&self) -> usize {
        match self.in_out {
            InOut::Inner => self.device.inner_object_count(self.joint_index),
            InOut::Outer => self.device.outer_object_count(self.joint_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Caller contract: `i < len()`. Checked in debug builds only.
    pub fn at(&self, i: usize) -> CollisionObject<'a> {
        self.self_assert(i);
        CollisionObject::scoped(self.device, self.joint_index, i, self.in_out)
    }

    pub fn iter(&self) -> impl Iterator<Item = CollisionObject<'a>> + 'a {
        let v = *self;
        (0..v.len()).map(move |i| CollisionObject::scoped(v.device, v.joint_index, i, v.in_out))
    }

    fn self_assert(&self, i: usize) {
        debug_assert!(self.joint_index < self.device.njoints());
        debug_assert!(i < self.len());
    }
}

/// Indexed view over the joints of a device, universe excluded.
///
/// Two index spaces meet here: callers see `0..len()`, the model
/// numbers the same joints `1..njoints` with index 0 reserved for the
/// universe. The translation happens once, in `at`.
#[derive(Debug, Clone, Copy)]
pub struct JointVector<'a> {
    device: &'a Device,
}

impl<'a> JointVector<'a> {
    pub(crate) fn new(device: &'a Device) -> Self {
        Self { device }
    }

    pub fn len(&self) -> usize {
        self.device.njoints() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First externally visible joint index.
    pub fn ibegin(&self) -> usize {
        0
    }

    /// Exclusive upper bound, equals `len()`.
    pub fn iend(&self) -> usize {
        self.len()
    }

    // model index + 1 because the model's first joint is the universe
    pub fn at(&self, i: usize) -> Joint<'a> {
        self.self_assert(i);
        Joint::new(self.device, i + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = Joint<'a>> + 'a {
        let device = self.device;
        (self.ibegin()..self.iend()).map(move |i| Joint::new(device, i + 1))
    }

    fn self_assert(&self, i: usize) {
        debug_assert!(i >= self.ibegin());
        debug_assert!(i < self.iend());
    }
}

/// Mutable counterpart of [`JointVector`]. Hands out one live mutable
/// joint handle at a time; shared handles are still available through
/// `at`.
#[derive(Debug)]
pub struct JointVectorMut<'a> {
    device: &'a mut Device,
}

impl<'a> JointVectorMut<'a> {
    pub(crate) fn new(device: &'a mut Device) -> Self {
        Self { device }
    }

    pub fn len(&self) -> usize {
        self.device.njoints() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ibegin(&self) -> usize {
        0
    }

    pub fn iend(&self) -> usize {
        self.len()
    }

    pub fn at(&self, i: usize) -> Joint<'_> {
        self.self_assert(i);
        Joint::new(self.device, i + 1)
    }

    pub fn at_mut(&mut self, i: usize) -> JointMut<'_> {
        self.self_assert(i);
        JointMut::new(self.device, i + 1)
    }

    fn self_assert(&self, i: usize) {
        debug_assert!(i >= self.ibegin());
        debug_assert!(i < self.iend());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::outer_objects;
    use crate::{GeomModel, GeometryObject, JointModel, JointType, Model, Shape};
    use nalgebra::Isometry3;

    // Serial chain under the universe: one joint per entry of
    // `inner_counts` beyond the first, `inner_counts[j]` geometries on
    // the body of internal joint j.
    fn chain_device(inner_counts: &[usize]) -> Device {
        let mut joints = Vec::new();
        for j in 0..inner_counts.len() {
            joints.push(JointModel {
                name: if j == 0 {
                    "universe".to_string()
                } else {
                    format!("joint_{j}")
                },
                joint_type: if j == 0 {
                    JointType::Fixed
                } else {
                    JointType::Revolute
                },
                parent: j.saturating_sub(1),
                placement: Isometry3::identity(),
                position_bounds: (-1.0, 1.0),
                child_link: format!("link_{j}"),
            });
        }

        let mut objects = Vec::new();
        let mut inner = vec![Vec::new(); inner_counts.len()];
        for (j, &count) in inner_counts.iter().enumerate() {
            for k in 0..count {
                inner[j].push(objects.len());
                objects.push(GeometryObject {
                    name: format!("link_{j}_collision_{k}"),
                    parent_joint: j,
                    placement: Isometry3::identity(),
                    shape: Shape::Sphere { radius: 0.1 },
                });
            }
        }
        let outer = outer_objects(&joints, &objects);

        Device {
            name: "chain".to_string(),
            model: Model { joints },
            geom_model: GeomModel {
                objects,
                inner,
                outer,
            },
        }
    }

    #[test]
    fn device_object_vector_covers_global_space() {
        let device = chain_device(&[1, 2, 0, 2, 3]);
        let objects = device.objects();
        assert_eq!(objects.len(), 8);
        assert!(!objects.is_empty());
        for i in 0..objects.len() {
            assert_eq!(objects.at(i).index(), i);
        }
        assert_eq!(objects.iter().count(), 8);
    }

    #[test]
    fn empty_device() {
        let device = chain_device(&[0]);
        assert_eq!(device.objects().len(), 0);
        assert!(device.objects().is_empty());
        assert_eq!(device.joints().len(), 0);
        assert!(device.joints().is_empty());
        assert_eq!(device.joints().iter().count(), 0);
    }

    #[test]
    fn inner_and_outer_counts_are_independent() {
        let device = chain_device(&[1, 2, 0, 2, 3]);

        let inner = device.joint_objects(1, InOut::Inner);
        let outer = device.joint_objects(1, InOut::Outer);
        assert_eq!(inner.len(), 2);
        assert_eq!(outer.len(), 5);
        assert_eq!(inner.in_out(), InOut::Inner);
        assert_eq!(outer.joint_index(), 1);

        // per-joint ranks are not interchangeable across modes:
        // rank 3 exists in the outer set only
        assert!(outer.at(3).index() < device.ngeoms());
        assert!(3 >= inner.len());
    }

    #[test]
    fn scoped_objects_resolve_to_their_table_entries() {
        let device = chain_device(&[1, 2, 0, 2, 3]);
        let inner = device.joint_objects(1, InOut::Inner);
        // universe carries geometry 0, joint 1 carries 1 and 2
        assert_eq!(inner.at(0).index(), 1);
        assert_eq!(inner.at(1).index(), 2);

        let outer = device.joint_objects(1, InOut::Outer);
        let resolved: Vec<usize> = outer.iter().map(|o| o.index()).collect();
        assert_eq!(resolved, device.geom_model.outer[1]);
    }

    #[test]
    fn joint_vector_excludes_the_universe() {
        let device = chain_device(&[1, 2, 0, 2, 3]);
        let joints = device.joints();

        assert_eq!(device.njoints(), 5);
        assert_eq!(joints.len(), 4);
        assert_eq!(joints.ibegin(), 0);
        assert_eq!(joints.iend(), joints.len());

        // external 0 is internal 1, external 3 is internal 4
        assert_eq!(joints.at(0).index(), 1);
        assert_eq!(joints.at(3).index(), 4);

        let indices: Vec<usize> = joints.iter().map(|j| j.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn repeated_access_yields_equal_handles() {
        let device = chain_device(&[0, 1, 1]);
        let objects = device.objects();
        assert_eq!(objects.at(1), objects.at(1));

        let joints = device.joints();
        assert_eq!(joints.at(0), joints.at(0));
    }

    #[test]
    fn len_reflects_current_device_counts() {
        let mut device = chain_device(&[1, 1]);
        assert_eq!(device.objects().len(), 2);

        device.geom_model.inner[1].push(device.geom_model.objects.len());
        device.geom_model.objects.push(GeometryObject {
            name: "added".to_string(),
            parent_joint: 1,
            placement: Isometry3::identity(),
            shape: Shape::Sphere { radius: 0.2 },
        });

        // views are built cheaply and never snapshot counts
        assert_eq!(device.objects().len(), 3);
        assert_eq!(device.joint_objects(1, InOut::Inner).len(), 2);
    }

    #[test]
    fn joint_vector_mut_access() {
        let mut device = chain_device(&[0, 1, 1]);
        let mut joints = device.joints_mut();
        assert_eq!(joints.len(), 2);
        assert_eq!(joints.ibegin(), 0);
        assert_eq!(joints.iend(), 2);
        assert_eq!(joints.at(1).index(), 2);

        joints.at_mut(0).set_position_bounds(-0.5, 0.5);
        assert_eq!(joints.at(0).position_bounds(), (-0.5, 0.5));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn object_access_out_of_range_asserts() {
        let device = chain_device(&[1, 1]);
        let objects = device.objects();
        let _ = objects.at(objects.len());
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn joint_access_out_of_range_asserts() {
        let device = chain_device(&[1, 2, 0, 2, 3]);
        let joints = device.joints();
        let _ = joints.at(4);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn inner_rank_not_valid_across_modes() {
        let device = chain_device(&[1, 2, 0, 2, 3]);
        // rank 3 is valid in the outer set of joint 1, not the inner one
        let _ = device.joint_objects(1, InOut::Inner).at(3);
    }
}

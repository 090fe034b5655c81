use log::debug;

use super::bfs::bfs;
use super::utils::*;
use super::{Device, DeviceError};

impl Device {
    /// Build a device from a URDF document held in memory.
    pub fn from_urdf_string(str: &str) -> Result<Self, DeviceError> {
        let robot = urdf_rs::read_from_string(str)?;
        let name = robot.name.clone();

        // one (joint, link) entry per link, indexed by link id
        let entries = link_entries(robot);

        // the link no joint points at
        let root = root_link(&entries).ok_or(DeviceError::MissingRoot)?;

        // link_id digraph of the kinematic tree
        let graph = construct_link_graph(&entries);

        // parent links come before their children
        let order = bfs(&graph, root);

        let (model, geom_model) = build_models(&entries, &order);
        debug!(
            "loaded device `{}`: {} joints, {} geometries",
            name,
            model.njoints(),
            geom_model.ngeoms()
        );

        Ok(Self {
            name,
            model,
            geom_model,
        })
    }

    /// Build a device from a `.urdf` file on disk.
    pub fn from_urdf(path: &str) -> Result<Self, DeviceError> {
        if !is_urdf_file(path) {
            return Err(DeviceError::NotUrdf(path.to_string()));
        }
        let str = std::fs::read_to_string(path)?;
        Self::from_urdf_string(&str)
    }
}

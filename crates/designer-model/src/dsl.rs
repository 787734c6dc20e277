//! The declarative dashboard document.
//!
//! A dashboard is a JSON file listing component instance trees. It is the
//! whole configuration input of a session: the engine consumes it together
//! with a meta registry and derives everything else.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DesignerError, Result};
use crate::instance::ComponentInstance;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDsl {
    pub component_instances: Vec<ComponentInstance>,
}

impl DashboardDsl {
    /// Loads a dashboard document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader).map_err(|error| match error {
            DesignerError::Json(source) => DesignerError::Config {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dsl = serde_json::from_reader(reader)?;
        Ok(dsl)
    }
}

//! Container volumes and their tagged variants.

use serde::{Deserialize, Serialize};

/// A named volume mounted into a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVolume {
    pub name: String,
    pub variant: AppVolumeType,
}

/// Kind of storage backing a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppVolumeType {
    /// Data that can be dropped without real loss (caches and the like).
    Disposable,

    /// Internal data the user does not need to modify.
    Internal,

    /// Volume stored in an accessible filesystem location.
    External {
        container_path: String,
        readonly: bool,
    },

    /// Binding to a real directory of the host.
    BindToPath {
        real_path: String,
        container_path: String,
        readonly: bool,
    },
}

/// Flattened view of a volume for tabular display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeRow<'a> {
    pub name: &'a str,
    pub kind: &'static str,
    pub host_path: Option<&'a str>,
    pub container_path: Option<&'a str>,
    pub readonly: Option<bool>,
}

impl AppVolumeType {
    /// Variant name as shown to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Disposable => "Disposable",
            Self::Internal => "Internal",
            Self::External { .. } => "External",
            Self::BindToPath { .. } => "Bind to path",
        }
    }
}

impl AppVolume {
    /// Flatten the volume into one display row; cells that do not apply to
    /// the variant are `None`.
    pub fn row(&self) -> VolumeRow<'_> {
        let (host_path, container_path, readonly) = match &self.variant {
            AppVolumeType::Disposable | AppVolumeType::Internal => (None, None, None),
            AppVolumeType::External {
                container_path,
                readonly,
            } => (None, Some(container_path.as_str()), Some(*readonly)),
            AppVolumeType::BindToPath {
                real_path,
                container_path,
                readonly,
            } => (
                Some(real_path.as_str()),
                Some(container_path.as_str()),
                Some(*readonly),
            ),
        };

        VolumeRow {
            name: &self.name,
            kind: self.variant.kind(),
            host_path,
            container_path,
            readonly,
        }
    }
}

//! Material binding handle

use serde::{Deserialize, Serialize};

/// Opaque identifier of a host-side material
///
/// The engine never inspects materials; it only binds the configured one to
/// every node it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

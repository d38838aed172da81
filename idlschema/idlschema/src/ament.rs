//! [`RecordLookup`] over ament install prefixes.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use idlschema_core::{
    ActionRecords, DefinitionError, FieldEntry, InterfaceRegistry, LookupError, QualifiedName,
    RecordDef, RecordLookup, ServiceRecords,
};
use tracing::debug;

use crate::builtin::builtin_records;

/// Environment variable listing install prefixes, `:`-separated on Unix.
pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

const SERVICE_SUFFIXES: [&str; 2] = ["_Request", "_Response"];
const ACTION_SUFFIXES: [&str; 3] = ["_Goal", "_Result", "_Feedback"];

/// Reads interface definitions from `<prefix>/share/<pkg>/<kind>/` directories.
///
/// A record `pkg/msg/Name` is looked up as `Name.msg`, then `Name.idl`.  The
/// sub-records of services and actions (`pkg/srv/Name_Request`,
/// `pkg/action/Name_Goal`, ...) come from `Name.srv` / `Name.action`, then
/// `Name.idl`.  Prefixes are searched in order and the first file found wins.
///
/// Files are read on every lookup; wrap the composer in a
/// [`SchemaCache`](idlschema_core::SchemaCache) to avoid repeated parsing.
#[derive(Debug, Clone)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
    builtins: InterfaceRegistry,
}

impl AmentIndex {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            builtins: builtin_records().into_iter().collect(),
        }
    }

    /// Prefixes from `AMENT_PREFIX_PATH`; empty when the variable is unset.
    pub fn from_env() -> Self {
        match env::var_os(AMENT_PREFIX_PATH) {
            Some(paths) => {
                Self::new(env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()))
            }
            None => Self::new(Vec::<PathBuf>::new()),
        }
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Path of the file that defines `qualified_name`, if any prefix has one.
    ///
    /// Accepts records (`pkg/msg/Name`, `pkg/srv/Name_Request`) as well as
    /// whole services and actions (`pkg/srv/Name`).
    pub fn interface_file(&self, qualified_name: &str) -> Option<PathBuf> {
        let location = InterfaceLocation::parse(qualified_name)?;
        self.find_file(&location)
    }

    fn find_file(&self, location: &InterfaceLocation) -> Option<PathBuf> {
        self.prefixes.iter().find_map(|prefix| {
            let dir = prefix
                .join("share")
                .join(&location.package)
                .join(&location.kind);
            file_extensions(&location.kind)
                .iter()
                .map(|ext| dir.join(format!("{}.{ext}", location.base)))
                .find(|path| path.is_file())
        })
    }

    fn require_file(&self, qualified_name: &str) -> Result<PathBuf, LookupError> {
        InterfaceLocation::parse(qualified_name)
            .and_then(|location| self.find_file(&location))
            .ok_or_else(|| LookupError::not_found(qualified_name))
    }
}

impl RecordLookup for AmentIndex {
    fn lookup_record(&self, qualified_name: &str) -> Result<Vec<FieldEntry>, LookupError> {
        let Some(location) = InterfaceLocation::parse(qualified_name) else {
            return Err(LookupError::not_found(qualified_name));
        };
        if location.base == location.name && location.kind != "msg" {
            // A service or action is not a record by itself.
            return Err(LookupError::not_found(qualified_name));
        }

        let Some(path) = self.find_file(&location) else {
            if self.builtins.contains(qualified_name) {
                debug!(name = qualified_name, "using built-in definition");
                return self.builtins.lookup_record(qualified_name);
            }
            return Err(LookupError::not_found(qualified_name));
        };

        debug!(name = qualified_name, path = %path.display(), "loading interface file");
        let defs = load_file(&path, &location)
            .map_err(|e| LookupError::unavailable(qualified_name, e))?;
        defs.into_iter()
            .find(|def| def.name == qualified_name)
            .map(|def| def.fields)
            .ok_or_else(|| {
                LookupError::unavailable(
                    qualified_name,
                    format!("'{}' does not define this type", path.display()),
                )
            })
    }

    fn lookup_service(&self, qualified_name: &str) -> Result<ServiceRecords, LookupError> {
        self.require_file(qualified_name)?;
        Ok(ServiceRecords::conventional(qualified_name))
    }

    fn lookup_action(&self, qualified_name: &str) -> Result<ActionRecords, LookupError> {
        self.require_file(qualified_name)?;
        Ok(ActionRecords::conventional(qualified_name))
    }
}

/// Where a qualified name lives in an install space.
#[derive(Debug)]
struct InterfaceLocation {
    package: String,
    kind: String,
    /// Type name as requested (`Trigger_Request`).
    name: String,
    /// File stem (`Trigger`).
    base: String,
}

impl InterfaceLocation {
    fn parse(qualified_name: &str) -> Option<Self> {
        let parsed = QualifiedName::parse(qualified_name)?;
        let [package, kind] = parsed.namespaces.as_slice() else {
            return None;
        };
        let suffixes: &[&str] = match kind.as_str() {
            "msg" => &[],
            "srv" => &SERVICE_SUFFIXES,
            "action" => &ACTION_SUFFIXES,
            _ => return None,
        };
        let base = suffixes
            .iter()
            .find_map(|s| parsed.name.strip_suffix(s))
            .filter(|b| !b.is_empty())
            .unwrap_or(parsed.name.as_str())
            .to_string();
        Some(Self {
            package: package.clone(),
            kind: kind.clone(),
            name: parsed.name.clone(),
            base,
        })
    }

    fn interface_name(&self) -> String {
        format!("{}/{}/{}", self.package, self.kind, self.base)
    }
}

/// Candidate file extensions for an interface kind, in search order.
fn file_extensions(kind: &str) -> &'static [&'static str] {
    match kind {
        #[cfg(all(feature = "ros2msg", feature = "ros2idl"))]
        "msg" => &["msg", "idl"],
        #[cfg(all(feature = "ros2msg", feature = "ros2idl"))]
        "srv" => &["srv", "idl"],
        #[cfg(all(feature = "ros2msg", feature = "ros2idl"))]
        "action" => &["action", "idl"],
        #[cfg(all(feature = "ros2msg", not(feature = "ros2idl")))]
        "msg" => &["msg"],
        #[cfg(all(feature = "ros2msg", not(feature = "ros2idl")))]
        "srv" => &["srv"],
        #[cfg(all(feature = "ros2msg", not(feature = "ros2idl")))]
        "action" => &["action"],
        #[cfg(all(feature = "ros2idl", not(feature = "ros2msg")))]
        "msg" | "srv" | "action" => &["idl"],
        _ => &[],
    }
}

fn load_file(path: &Path, location: &InterfaceLocation) -> Result<Vec<RecordDef>, DefinitionError> {
    let text = fs::read_to_string(path)
        .map_err(|e| DefinitionError(format!("cannot read '{}': {e}", path.display())))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    parse_definitions(ext, &location.interface_name(), &text)
}

#[cfg_attr(
    not(all(feature = "ros2idl", feature = "ros2msg")),
    allow(unused_variables)
)]
fn parse_definitions(
    ext: &str,
    interface_name: &str,
    text: &str,
) -> Result<Vec<RecordDef>, DefinitionError> {
    match ext {
        #[cfg(feature = "ros2idl")]
        "idl" => idlschema_ros2idl::parse_idl(text),
        #[cfg(feature = "ros2msg")]
        "msg" | "srv" | "action" => idlschema_ros2msg::parse_interface(interface_name, text),
        _ => Err(format!("unsupported interface file extension '{ext}'").into()),
    }
}

use std::collections::{BTreeSet, HashSet};
use std::ffi::CStr;

use ash::{vk, Entry};
use log::debug;
use raw_window_handle::HasDisplayHandle;

use crate::error::{Error, Result};

pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerInfo {
    pub name: String,
    pub description: String,
    pub spec_version: u32,
    pub implementation_version: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: String,
    pub spec_version: u32,
}

impl ExtensionInfo {
    pub fn new(name: impl Into<String>, spec_version: u32) -> Self {
        Self {
            name: name.into(),
            spec_version,
        }
    }
}

impl Named for LayerInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ExtensionInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

pub(crate) fn driver_str<E>(
    c_str: std::result::Result<&CStr, E>,
    field: &'static str,
) -> Result<String> {
    c_str
        .map(|c_str| c_str.to_string_lossy().into_owned())
        .map_err(|_| Error::UnterminatedString(field))
}

impl TryFrom<&vk::LayerProperties> for LayerInfo {
    type Error = Error;

    fn try_from(properties: &vk::LayerProperties) -> Result<Self> {
        Ok(Self {
            name: driver_str(properties.layer_name_as_c_str(), "layer name")?,
            description: driver_str(properties.description_as_c_str(), "layer description")?,
            spec_version: properties.spec_version,
            implementation_version: properties.implementation_version,
        })
    }
}

impl TryFrom<&vk::ExtensionProperties> for ExtensionInfo {
    type Error = Error;

    fn try_from(properties: &vk::ExtensionProperties) -> Result<Self> {
        Ok(Self {
            name: driver_str(properties.extension_name_as_c_str(), "extension name")?,
            spec_version: properties.spec_version,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct CapabilityRequest {
    pub layers: Vec<LayerInfo>,
    pub extensions: Vec<ExtensionInfo>,
}

impl CapabilityRequest {
    pub fn new(layers: Vec<LayerInfo>, extensions: Vec<ExtensionInfo>) -> Self {
        Self { layers, extensions }
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(Named::name)
    }

    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(Named::name)
    }

    pub fn has_extension(&self, name: &CStr) -> bool {
        let name = name.to_string_lossy();
        self.extension_names().any(|requested| requested == name)
    }
}

pub(crate) fn non_empty<T>(items: Vec<T>, what: &'static str) -> Result<Vec<T>> {
    if items.is_empty() {
        Err(Error::EmptyResult { what })
    } else {
        Ok(items)
    }
}

pub fn list_layers(entry: &Entry) -> Result<Vec<LayerInfo>> {
    let properties = unsafe { entry.enumerate_instance_layer_properties() }
        .map_err(Error::query("Error getting list of layers"))?;
    debug!("Found {} instance layers", properties.len());

    let properties = non_empty(properties, "Layer")?;
    properties.iter().map(LayerInfo::try_from).collect()
}

pub fn list_extensions(entry: &Entry) -> Result<Vec<ExtensionInfo>> {
    let properties = unsafe { entry.enumerate_instance_extension_properties(None) }
        .map_err(Error::query("Error getting list of extensions"))?;
    debug!("Found {} instance extensions", properties.len());

    let properties = non_empty(properties, "Extension")?;
    properties.iter().map(ExtensionInfo::try_from).collect()
}

pub fn list_window_required_extension_names<W>(window: &W) -> Result<Vec<String>>
where
    W: HasDisplayHandle + ?Sized,
{
    let display_handle = window
        .display_handle()
        .map_err(|error| Error::WindowQuery {
            reason: error.to_string(),
        })?;

    let names = ash_window::enumerate_required_extensions(display_handle.as_raw()).map_err(
        |code| Error::WindowQuery {
            reason: format!("failed to get names of instance extensions: {}", code),
        },
    )?;

    Ok(names
        .iter()
        .map(|name| unsafe { CStr::from_ptr(*name) }.to_string_lossy().into_owned())
        .collect())
}

pub fn filter_by_name<T, S>(infos: &[T], names: &[S]) -> Vec<T>
where
    T: Named + Clone,
    S: AsRef<str>,
{
    let names: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
    infos
        .iter()
        .filter(|info| names.contains(info.name()))
        .cloned()
        .collect()
}

pub fn missing_extensions<R, S>(requested: &[R], supported: &[S]) -> Vec<String>
where
    R: Named,
    S: Named,
{
    let supported: HashSet<&str> = supported.iter().map(Named::name).collect();
    requested
        .iter()
        .map(Named::name)
        .filter(|name| !supported.contains(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Device creation only goes ahead when every requested extension is in
/// `supported`; the missing names are reported sorted and space separated.
pub fn require_extensions(
    requested: &[ExtensionInfo],
    supported: &[ExtensionInfo],
) -> Result<()> {
    let missing = missing_extensions(requested, supported);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::UnsatisfiedRequirement {
            missing: missing.join(" "),
        })
    }
}

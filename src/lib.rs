pub mod capability;
pub mod device_context;
pub mod error;
pub mod gpu;
#[cfg(test)]
mod mock;
mod names;
pub mod surface;
pub mod vulkan;

pub use ash::ext::debug_utils::NAME as DEBUG_UTILS_EXTENSION;
pub use ash::khr::swapchain::NAME as SWAPCHAIN_EXTENSION;
pub use ash::{vk, Entry};
pub use capability::{
    filter_by_name, list_extensions, list_layers, list_window_required_extension_names,
    CapabilityRequest, ExtensionInfo, LayerInfo, Named,
};
pub use error::{Error, Result};

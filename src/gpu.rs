use ash::vk::{PhysicalDevice, PhysicalDeviceProperties, PhysicalDeviceType};
use log::debug;

use crate::capability::{
    driver_str, non_empty, require_extensions, CapabilityRequest, ExtensionInfo,
};
use crate::device_context::DeviceContext;
use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::vulkan::Vulkan;

#[derive(Clone)]
pub struct Gpu<'a> {
    vulkan: &'a Vulkan,
    physical_device: PhysicalDevice,
    queue_family_index: u32,
    name: String,
    properties: PhysicalDeviceProperties,
}

impl<'a> Gpu<'a> {
    pub(crate) fn new(
        vulkan: &'a Vulkan,
        physical_device: PhysicalDevice,
        queue_family_index: u32,
    ) -> Result<Self> {
        let properties = unsafe {
            vulkan
                .vk_instance()
                .get_physical_device_properties(physical_device)
        };
        let name = driver_str(properties.device_name_as_c_str(), "device name")?;

        Ok(Self {
            vulkan,
            physical_device,
            queue_family_index,
            name,
            properties,
        })
    }

    /// Fails with [`Error::UnsatisfiedRequirement`] before the driver is asked
    /// for a device if any requested extension is missing on this GPU.
    pub fn device_context(&self, request: &CapabilityRequest) -> Result<DeviceContext<'a>> {
        let supported = self.device_extensions()?;
        require_extensions(&request.extensions, &supported)?;
        DeviceContext::new(self.clone(), request)
    }

    pub fn device_extensions(&self) -> Result<Vec<ExtensionInfo>> {
        let properties = unsafe {
            self.vulkan
                .vk_instance()
                .enumerate_device_extension_properties(self.physical_device)
        }
        .map_err(Error::query("Error while getting list of device extension properties"))?;
        debug!("{} supports {} device extensions", self.name, properties.len());

        let properties = non_empty(properties, "Device extension")?;
        properties.iter().map(ExtensionInfo::try_from).collect()
    }

    pub fn is_surface_supported(&self, surface: &Surface<'_>) -> Result<bool> {
        unsafe {
            surface.loader().get_physical_device_surface_support(
                self.physical_device,
                self.queue_family_index,
                surface.handle(),
            )
        }
        .map_err(Error::query("Error while querying surface support"))
    }

    pub fn vk_physical_device(&self) -> &PhysicalDevice {
        &self.physical_device
    }

    pub fn queue_family_index(&self) -> u32 {
        self.queue_family_index
    }

    pub fn queue_family_count(&self) -> u32 {
        unsafe {
            self.vulkan
                .vk_instance()
                .get_physical_device_queue_family_properties(self.physical_device)
        }
        .len() as u32
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_discrete(&self) -> bool {
        self.properties.device_type == PhysicalDeviceType::DISCRETE_GPU
    }

    pub fn api_version(&self) -> u32 {
        self.properties.api_version
    }

    pub fn vulkan(&self) -> &'a Vulkan {
        self.vulkan
    }
}

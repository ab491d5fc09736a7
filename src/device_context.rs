use crate::capability::CapabilityRequest;
use crate::error::{Error, Result};
use crate::gpu::Gpu;
use crate::names::NameArray;
use ash::vk::{DeviceCreateInfo, DeviceQueueCreateInfo, Queue};
use ash::Device;
use log::debug;

pub struct DeviceContext<'a> {
    gpu: Gpu<'a>,
    handle: Device,
    queue_family_index: u32,
}

impl<'a> DeviceContext<'a> {
    // Extension support is checked by Gpu::device_context.
    pub(crate) fn new(gpu: Gpu<'a>, request: &CapabilityRequest) -> Result<Self> {
        let queue_family_index = gpu.queue_family_index();
        let priorities: [f32; 1] = [1.];
        let queue_info = [DeviceQueueCreateInfo::default()
            .queue_priorities(&priorities)
            .queue_family_index(queue_family_index)];

        let layer_names = NameArray::new(request.layer_names())?;
        let extension_names = NameArray::new(request.extension_names())?;
        debug!(
            "Creating device on {} with {} layers and {} extensions",
            gpu.name(),
            layer_names.len(),
            extension_names.len()
        );

        // Device layers are deprecated but still forwarded for older loaders.
        #[allow(deprecated)]
        let create_info = DeviceCreateInfo::default()
            .queue_create_infos(&queue_info)
            .enabled_layer_names(layer_names.as_ptrs())
            .enabled_extension_names(extension_names.as_ptrs());

        let handle = unsafe {
            gpu.vulkan()
                .vk_instance()
                .create_device(*gpu.vk_physical_device(), &create_info, None)
        }
        .map_err(Error::create("Error while creating logical device"))?;
        debug!("Created device {:?}", handle.handle());

        Ok(Self {
            gpu,
            handle,
            queue_family_index,
        })
    }

    pub fn queue_family_index(&self) -> u32 {
        self.queue_family_index
    }

    pub fn queue(&self) -> Queue {
        unsafe { self.handle.get_device_queue(self.queue_family_index, 0) }
    }

    pub fn handle(&self) -> &Device {
        &self.handle
    }

    pub fn gpu(&self) -> &Gpu<'a> {
        &self.gpu
    }
}

impl Drop for DeviceContext<'_> {
    fn drop(&mut self) {
        debug!("Dropping device {:?}", self.handle.handle());
        unsafe { self.handle.destroy_device(None) };
    }
}

use std::borrow::Cow;
use std::ffi::{CStr, CString};

use ash::vk::{
    ApplicationInfo, Bool32, DebugUtilsMessageSeverityFlagsEXT, DebugUtilsMessageTypeFlagsEXT,
    DebugUtilsMessengerCallbackDataEXT, DebugUtilsMessengerCreateInfoEXT, DebugUtilsMessengerEXT,
    InstanceCreateInfo, PhysicalDevice, FALSE,
};
use ash::{ext::debug_utils, vk, Entry, Instance};
use log::{debug, warn};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::capability::CapabilityRequest;
use crate::error::{Error, Result};
use crate::gpu::Gpu;
use crate::names::NameArray;
use crate::surface::Surface;

const VALIDATION_TARGET: &str = "vk_bootstrap::validation";

unsafe extern "system" fn vulkan_debug_callback(
    message_severity: DebugUtilsMessageSeverityFlagsEXT,
    message_type: DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut std::os::raw::c_void,
) -> Bool32 {
    let callback_data = *p_callback_data;
    let message_id_number = callback_data.message_id_number;

    let message_id_name = if callback_data.p_message_id_name.is_null() {
        Cow::from("")
    } else {
        CStr::from_ptr(callback_data.p_message_id_name).to_string_lossy()
    };

    let message = if callback_data.p_message.is_null() {
        Cow::from("")
    } else {
        CStr::from_ptr(callback_data.p_message).to_string_lossy()
    };

    let level = if message_severity.contains(DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        log::Level::Error
    } else if message_severity.contains(DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        log::Level::Warn
    } else if message_severity.contains(DebugUtilsMessageSeverityFlagsEXT::INFO) {
        log::Level::Info
    } else {
        log::Level::Trace
    };

    log::log!(
        target: VALIDATION_TARGET,
        level,
        "{:?} [{} ({})] : {}",
        message_type,
        message_id_name,
        message_id_number,
        message,
    );

    FALSE
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationIdentity {
    pub application_name: String,
    pub application_version: u32,
    pub engine_name: String,
    pub engine_version: u32,
    pub api_version: u32,
}

impl Default for ApplicationIdentity {
    fn default() -> Self {
        Self {
            application_name: String::from("My Application"),
            application_version: 0,
            engine_name: String::from("Cello"),
            engine_version: 0,
            api_version: vk::API_VERSION_1_0,
        }
    }
}

impl ApplicationIdentity {
    pub fn with_application(mut self, name: impl Into<String>, version: u32) -> Self {
        self.application_name = name.into();
        self.application_version = version;
        self
    }

    pub fn with_engine(mut self, name: impl Into<String>, version: u32) -> Self {
        self.engine_name = name.into();
        self.engine_version = version;
        self
    }

    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }
}

pub fn select_first<T: Copy>(devices: &[T]) -> Option<(T, usize)> {
    devices.first().map(|device| (*device, 0))
}

pub struct Vulkan {
    debug_messenger: Option<(DebugUtilsMessengerEXT, debug_utils::Instance)>,
    library: Entry,
    instance: Instance,
}

impl Vulkan {
    pub fn load(request: &CapabilityRequest, identity: &ApplicationIdentity) -> Result<Self> {
        let library = unsafe { Entry::load() }?;
        Self::new(library, request, identity)
    }

    pub fn new(
        library: Entry,
        request: &CapabilityRequest,
        identity: &ApplicationIdentity,
    ) -> Result<Self> {
        let application_name = CString::new(identity.application_name.as_str())?;
        let engine_name = CString::new(identity.engine_name.as_str())?;

        let layer_names = NameArray::new(request.layer_names())?;
        let extension_names = NameArray::new(request.extension_names())?;
        debug!(
            "Creating instance with {} layers and {} extensions",
            layer_names.len(),
            extension_names.len()
        );

        let appinfo = ApplicationInfo::default()
            .application_name(&application_name)
            .application_version(identity.application_version)
            .engine_name(&engine_name)
            .engine_version(identity.engine_version)
            .api_version(identity.api_version);

        let create_info = InstanceCreateInfo::default()
            .application_info(&appinfo)
            .enabled_layer_names(layer_names.as_ptrs())
            .enabled_extension_names(extension_names.as_ptrs());

        let instance = unsafe { library.create_instance(&create_info, None) }
            .map_err(Error::create("Error while creating vulkan instance"))?;
        debug!("Created instance {:?}", instance.handle());

        let debug_messenger = if request.has_extension(debug_utils::NAME) {
            Self::create_debug_messenger(&library, &instance)
        } else {
            None
        };

        Ok(Self {
            debug_messenger,
            library,
            instance,
        })
    }

    fn create_debug_messenger(
        library: &Entry,
        instance: &Instance,
    ) -> Option<(DebugUtilsMessengerEXT, debug_utils::Instance)> {
        let debug_info = DebugUtilsMessengerCreateInfoEXT::default()
            .message_severity(
                DebugUtilsMessageSeverityFlagsEXT::ERROR
                    | DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | DebugUtilsMessageSeverityFlagsEXT::INFO
                    | DebugUtilsMessageSeverityFlagsEXT::VERBOSE,
            )
            .message_type(
                DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(vulkan_debug_callback));

        let debug_utils_loader = debug_utils::Instance::new(library, instance);
        match unsafe { debug_utils_loader.create_debug_utils_messenger(&debug_info, None) } {
            Ok(messenger) => Some((messenger, debug_utils_loader)),
            Err(error) => {
                warn!("Continuing without debug messenger: {}", error);
                None
            }
        }
    }

    pub fn library(&self) -> &Entry {
        &self.library
    }

    pub fn vk_instance(&self) -> &Instance {
        &self.instance
    }

    fn physical_devices(&self) -> Result<Vec<PhysicalDevice>> {
        let devices = unsafe { self.instance.enumerate_physical_devices() }
            .map_err(Error::query("Error getting list of physical devices"))?;
        debug!("Found {} physical devices", devices.len());
        Ok(devices)
    }

    pub fn gpus(&self) -> Result<Vec<Gpu<'_>>> {
        self.physical_devices()?
            .iter()
            .map(|device| Gpu::new(self, *device, 0))
            .collect()
    }

    /// The returned [`Gpu`] uses the selected device's position in the
    /// enumeration as its queue family index, which is always 0. The device's
    /// queue families are not inspected, so nothing guarantees that family 0
    /// supports graphics or presentation.
    pub fn select_gpu(&self) -> Result<Gpu<'_>> {
        let devices = self.physical_devices()?;
        let (device, index) =
            select_first(&devices).ok_or(Error::EmptyResult { what: "Physical device" })?;

        warn!(
            "Using physical device index {} as queue family index without querying queue families",
            index
        );
        let gpu = Gpu::new(self, device, index as u32)?;
        debug!("Selected physical device {}", gpu.name());
        Ok(gpu)
    }

    pub fn create_surface<W>(&self, window: &W) -> Result<Surface<'_>>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        Surface::new(self, window)
    }
}

impl Drop for Vulkan {
    fn drop(&mut self) {
        debug!("Dropping instance {:?}", self.instance.handle());
        unsafe {
            if let Some((messenger, loader)) = self.debug_messenger.take() {
                loader.destroy_debug_utils_messenger(messenger, None);
            }
            self.instance.destroy_instance(None);
        }
    }
}

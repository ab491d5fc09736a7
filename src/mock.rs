// In-process stand-in for a Vulkan driver, reached through a custom
// vkGetInstanceProcAddr. State is per test thread.

use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr};

use ash::vk::{self, Handle};
use ash::Entry;

pub(crate) const INSTANCE: u64 = 0x1000;
pub(crate) const DEVICE: u64 = 0x2000;
pub(crate) const SURFACE: u64 = 0x3000;
pub(crate) const QUEUE: u64 = 0x4000;

#[derive(Default)]
pub(crate) struct Driver {
    pub layers: Vec<&'static str>,
    pub instance_extensions: Vec<&'static str>,
    pub device_extensions: Vec<&'static str>,
    pub physical_devices: Vec<u64>,
    pub queue_family_count: u32,
    pub unterminated_device_name: bool,
    pub surface_supported: bool,
    pub query_error: Option<vk::Result>,
    pub instance_create_error: Option<vk::Result>,
    pub device_create_error: Option<vk::Result>,

    pub application_name: String,
    pub enabled_layers: Vec<String>,
    pub enabled_extensions: Vec<String>,
    pub device_enabled_extensions: Vec<String>,
    pub device_queue_family: Option<u32>,
    pub create_device_calls: u32,
    pub destroyed: Vec<&'static str>,
}

thread_local! {
    static DRIVER: RefCell<Driver> = RefCell::new(Driver::default());
}

pub(crate) fn entry(driver: Driver) -> Entry {
    DRIVER.with(|state| *state.borrow_mut() = driver);
    unsafe {
        Entry::from_static_fn(ash::StaticFn {
            get_instance_proc_addr,
        })
    }
}

pub(crate) fn driver<R>(f: impl FnOnce(&mut Driver) -> R) -> R {
    DRIVER.with(|state| f(&mut state.borrow_mut()))
}

pub(crate) fn write_name(target: &mut [c_char], name: &str) {
    for (slot, byte) in target.iter_mut().zip(name.bytes()) {
        *slot = byte as c_char;
    }
}

fn layer_properties(name: &str) -> vk::LayerProperties {
    let mut properties = vk::LayerProperties {
        spec_version: vk::API_VERSION_1_3,
        implementation_version: 1,
        ..Default::default()
    };
    write_name(&mut properties.layer_name, name);
    write_name(&mut properties.description, "mock layer");
    properties
}

fn extension_properties(names: &[&str]) -> Vec<vk::ExtensionProperties> {
    names
        .iter()
        .map(|name| {
            let mut properties = vk::ExtensionProperties {
                spec_version: 1,
                ..Default::default()
            };
            write_name(&mut properties.extension_name, name);
            properties
        })
        .collect()
}

unsafe fn fill<T: Copy>(items: &[T], count: *mut u32, out: *mut T) -> vk::Result {
    if out.is_null() {
        *count = items.len() as u32;
        return vk::Result::SUCCESS;
    }

    let written = items.len().min(*count as usize);
    std::ptr::copy_nonoverlapping(items.as_ptr(), out, written);
    *count = written as u32;
    if written < items.len() {
        vk::Result::INCOMPLETE
    } else {
        vk::Result::SUCCESS
    }
}

unsafe fn c_names(count: u32, names: *const *const c_char) -> Vec<String> {
    (0..count as usize)
        .map(|i| CStr::from_ptr(*names.add(i)).to_string_lossy().into_owned())
        .collect()
}

unsafe extern "system" fn enumerate_instance_layer_properties(
    count: *mut u32,
    out: *mut vk::LayerProperties,
) -> vk::Result {
    let (error, layers) = driver(|d| (d.query_error, d.layers.clone()));
    if let Some(error) = error {
        return error;
    }
    let properties: Vec<_> = layers.iter().map(|name| layer_properties(name)).collect();
    fill(&properties, count, out)
}

unsafe extern "system" fn enumerate_instance_extension_properties(
    _layer_name: *const c_char,
    count: *mut u32,
    out: *mut vk::ExtensionProperties,
) -> vk::Result {
    let (error, extensions) = driver(|d| (d.query_error, d.instance_extensions.clone()));
    if let Some(error) = error {
        return error;
    }
    fill(&extension_properties(&extensions), count, out)
}

unsafe extern "system" fn create_instance(
    create_info: *const vk::InstanceCreateInfo<'_>,
    _allocator: *const vk::AllocationCallbacks<'_>,
    instance: *mut vk::Instance,
) -> vk::Result {
    let create_info = &*create_info;
    let application_info = &*create_info.p_application_info;
    let application_name = CStr::from_ptr(application_info.p_application_name)
        .to_string_lossy()
        .into_owned();
    let layers = c_names(
        create_info.enabled_layer_count,
        create_info.pp_enabled_layer_names,
    );
    let extensions = c_names(
        create_info.enabled_extension_count,
        create_info.pp_enabled_extension_names,
    );

    let error = driver(|d| {
        d.application_name = application_name;
        d.enabled_layers = layers;
        d.enabled_extensions = extensions;
        d.instance_create_error
    });
    if let Some(error) = error {
        return error;
    }
    *instance = vk::Instance::from_raw(INSTANCE);
    vk::Result::SUCCESS
}

unsafe extern "system" fn destroy_instance(
    _instance: vk::Instance,
    _allocator: *const vk::AllocationCallbacks<'_>,
) {
    driver(|d| d.destroyed.push("instance"));
}

unsafe extern "system" fn enumerate_physical_devices(
    _instance: vk::Instance,
    count: *mut u32,
    out: *mut vk::PhysicalDevice,
) -> vk::Result {
    let (error, devices) = driver(|d| (d.query_error, d.physical_devices.clone()));
    if let Some(error) = error {
        return error;
    }
    let devices: Vec<_> = devices
        .into_iter()
        .map(vk::PhysicalDevice::from_raw)
        .collect();
    fill(&devices, count, out)
}

unsafe extern "system" fn get_physical_device_properties(
    physical_device: vk::PhysicalDevice,
    out: *mut vk::PhysicalDeviceProperties,
) {
    let mut properties = vk::PhysicalDeviceProperties {
        api_version: vk::API_VERSION_1_1,
        device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
        ..Default::default()
    };
    if driver(|d| d.unterminated_device_name) {
        properties.device_name.fill(b'G' as c_char);
    } else {
        let name = format!("Mock GPU {:#x}", physical_device.as_raw());
        write_name(&mut properties.device_name, &name);
    }
    *out = properties;
}

unsafe extern "system" fn get_physical_device_queue_family_properties(
    _physical_device: vk::PhysicalDevice,
    count: *mut u32,
    out: *mut vk::QueueFamilyProperties,
) {
    let families = vec![
        vk::QueueFamilyProperties {
            queue_flags: vk::QueueFlags::GRAPHICS,
            queue_count: 1,
            ..Default::default()
        };
        driver(|d| d.queue_family_count) as usize
    ];
    fill(&families, count, out);
}

unsafe extern "system" fn enumerate_device_extension_properties(
    _physical_device: vk::PhysicalDevice,
    _layer_name: *const c_char,
    count: *mut u32,
    out: *mut vk::ExtensionProperties,
) -> vk::Result {
    let (error, extensions) = driver(|d| (d.query_error, d.device_extensions.clone()));
    if let Some(error) = error {
        return error;
    }
    fill(&extension_properties(&extensions), count, out)
}

unsafe extern "system" fn create_device(
    _physical_device: vk::PhysicalDevice,
    create_info: *const vk::DeviceCreateInfo<'_>,
    _allocator: *const vk::AllocationCallbacks<'_>,
    device: *mut vk::Device,
) -> vk::Result {
    let create_info = &*create_info;
    let queue_family = (*create_info.p_queue_create_infos).queue_family_index;
    let extensions = c_names(
        create_info.enabled_extension_count,
        create_info.pp_enabled_extension_names,
    );

    let error = driver(|d| {
        d.create_device_calls += 1;
        d.device_queue_family = Some(queue_family);
        d.device_enabled_extensions = extensions;
        d.device_create_error
    });
    if let Some(error) = error {
        return error;
    }
    *device = vk::Device::from_raw(DEVICE);
    vk::Result::SUCCESS
}

unsafe extern "system" fn destroy_device(
    _device: vk::Device,
    _allocator: *const vk::AllocationCallbacks<'_>,
) {
    driver(|d| d.destroyed.push("device"));
}

unsafe extern "system" fn get_device_queue(
    _device: vk::Device,
    _queue_family_index: u32,
    _queue_index: u32,
    queue: *mut vk::Queue,
) {
    *queue = vk::Queue::from_raw(QUEUE);
}

unsafe extern "system" fn get_physical_device_surface_support(
    _physical_device: vk::PhysicalDevice,
    _queue_family_index: u32,
    _surface: vk::SurfaceKHR,
    supported: *mut vk::Bool32,
) -> vk::Result {
    let (error, answer) = driver(|d| (d.query_error, d.surface_supported));
    if let Some(error) = error {
        return error;
    }
    *supported = if answer { vk::TRUE } else { vk::FALSE };
    vk::Result::SUCCESS
}

unsafe extern "system" fn create_xlib_surface(
    _instance: vk::Instance,
    _create_info: *const vk::XlibSurfaceCreateInfoKHR<'_>,
    _allocator: *const vk::AllocationCallbacks<'_>,
    surface: *mut vk::SurfaceKHR,
) -> vk::Result {
    *surface = vk::SurfaceKHR::from_raw(SURFACE);
    vk::Result::SUCCESS
}

unsafe extern "system" fn destroy_surface(
    _instance: vk::Instance,
    _surface: vk::SurfaceKHR,
    _allocator: *const vk::AllocationCallbacks<'_>,
) {
    driver(|d| d.destroyed.push("surface"));
}

fn void_function(function: *const ()) -> vk::PFN_vkVoidFunction {
    Some(unsafe { std::mem::transmute::<*const (), unsafe extern "system" fn()>(function) })
}

unsafe extern "system" fn get_device_proc_addr(
    _device: vk::Device,
    name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    let function = match CStr::from_ptr(name).to_bytes() {
        b"vkDestroyDevice" => destroy_device as *const (),
        b"vkGetDeviceQueue" => get_device_queue as *const (),
        _ => return None,
    };
    void_function(function)
}

unsafe extern "system" fn get_instance_proc_addr(
    _instance: vk::Instance,
    name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    let function = match CStr::from_ptr(name).to_bytes() {
        b"vkEnumerateInstanceLayerProperties" => enumerate_instance_layer_properties as *const (),
        b"vkEnumerateInstanceExtensionProperties" => {
            enumerate_instance_extension_properties as *const ()
        }
        b"vkCreateInstance" => create_instance as *const (),
        b"vkDestroyInstance" => destroy_instance as *const (),
        b"vkEnumeratePhysicalDevices" => enumerate_physical_devices as *const (),
        b"vkGetPhysicalDeviceProperties" => get_physical_device_properties as *const (),
        b"vkGetPhysicalDeviceQueueFamilyProperties" => {
            get_physical_device_queue_family_properties as *const ()
        }
        b"vkEnumerateDeviceExtensionProperties" => {
            enumerate_device_extension_properties as *const ()
        }
        b"vkCreateDevice" => create_device as *const (),
        b"vkGetDeviceProcAddr" => get_device_proc_addr as *const (),
        b"vkGetPhysicalDeviceSurfaceSupportKHR" => {
            get_physical_device_surface_support as *const ()
        }
        b"vkCreateXlibSurfaceKHR" => create_xlib_surface as *const (),
        b"vkDestroySurfaceKHR" => destroy_surface as *const (),
        _ => return None,
    };
    void_function(function)
}

// Window stand-ins for surface creation.

pub(crate) struct XlibWindow;

impl raw_window_handle::HasDisplayHandle for XlibWindow {
    fn display_handle(
        &self,
    ) -> Result<raw_window_handle::DisplayHandle<'_>, raw_window_handle::HandleError> {
        let display = raw_window_handle::XlibDisplayHandle::new(
            Some(std::ptr::NonNull::<c_void>::dangling()),
            0,
        );
        Ok(unsafe {
            raw_window_handle::DisplayHandle::borrow_raw(raw_window_handle::RawDisplayHandle::Xlib(
                display,
            ))
        })
    }
}

impl raw_window_handle::HasWindowHandle for XlibWindow {
    fn window_handle(
        &self,
    ) -> Result<raw_window_handle::WindowHandle<'_>, raw_window_handle::HandleError> {
        let window = raw_window_handle::XlibWindowHandle::new(0x20);
        Ok(unsafe {
            raw_window_handle::WindowHandle::borrow_raw(raw_window_handle::RawWindowHandle::Xlib(
                window,
            ))
        })
    }
}

pub(crate) struct ClosedWindow;

impl raw_window_handle::HasDisplayHandle for ClosedWindow {
    fn display_handle(
        &self,
    ) -> Result<raw_window_handle::DisplayHandle<'_>, raw_window_handle::HandleError> {
        Err(raw_window_handle::HandleError::Unavailable)
    }
}

impl raw_window_handle::HasWindowHandle for ClosedWindow {
    fn window_handle(
        &self,
    ) -> Result<raw_window_handle::WindowHandle<'_>, raw_window_handle::HandleError> {
        Err(raw_window_handle::HandleError::Unavailable)
    }
}

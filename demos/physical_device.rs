use vk_bootstrap::vulkan::{ApplicationIdentity, Vulkan};
use vk_bootstrap::{
    filter_by_name, list_extensions, vk, CapabilityRequest, Entry, DEBUG_UTILS_EXTENSION,
    SWAPCHAIN_EXTENSION,
};

fn run() -> vk_bootstrap::Result<()> {
    let library = unsafe { Entry::load() }?;
    let extensions = list_extensions(&library)?;

    let debug_utils = DEBUG_UTILS_EXTENSION.to_string_lossy();
    let instance_request =
        CapabilityRequest::new(vec![], filter_by_name(&extensions, &[debug_utils]));
    let vulkan = Vulkan::new(library, &instance_request, &ApplicationIdentity::default())?;

    for gpu in vulkan.gpus()? {
        println!(
            "{} (discrete: {}, api {}.{}, {} queue families)",
            gpu.name(),
            gpu.is_discrete(),
            vk::api_version_major(gpu.api_version()),
            vk::api_version_minor(gpu.api_version()),
            gpu.queue_family_count()
        );
    }

    let gpu = vulkan.select_gpu()?;
    let swapchain = SWAPCHAIN_EXTENSION.to_string_lossy();
    let device_request =
        CapabilityRequest::new(vec![], filter_by_name(&gpu.device_extensions()?, &[swapchain]));
    let device = gpu.device_context(&device_request)?;
    println!(
        "Created device on {} with queue family {} (queue {:?})",
        device.gpu().name(),
        device.queue_family_index(),
        device.queue()
    );

    Ok(())
}

pub fn main() {
    env_logger::init();

    if let Err(error) = run() {
        println!(
            "Vulkan error with code {:?} ({}): {}",
            error.code(),
            error.enum_name(),
            error
        );
    }
}

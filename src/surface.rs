use ash::khr::surface;
use ash::vk::SurfaceKHR;
use log::debug;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::error::{Error, Result};
use crate::vulkan::Vulkan;

pub struct Surface<'a> {
    _vulkan: &'a Vulkan,
    loader: surface::Instance,
    handle: SurfaceKHR,
}

impl<'a> Surface<'a> {
    pub(crate) fn new<W>(vulkan: &'a Vulkan, window: &W) -> Result<Self>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        let window_handle = window.window_handle().map_err(|error| Error::SurfaceCreate {
            window: String::from("<unavailable>"),
            reason: error.to_string(),
        })?;
        let window_name = format!("{:?}", window_handle.as_raw());
        let display_handle = window.display_handle().map_err(|error| Error::SurfaceCreate {
            window: window_name.clone(),
            reason: error.to_string(),
        })?;

        let handle = unsafe {
            ash_window::create_surface(
                vulkan.library(),
                vulkan.vk_instance(),
                display_handle.as_raw(),
                window_handle.as_raw(),
                None,
            )
        }
        .map_err(|code| Error::SurfaceCreate {
            window: window_name.clone(),
            reason: code.to_string(),
        })?;
        debug!("Created surface {:?} for window {}", handle, window_name);

        Ok(Self {
            _vulkan: vulkan,
            loader: surface::Instance::new(vulkan.library(), vulkan.vk_instance()),
            handle,
        })
    }

    pub fn handle(&self) -> SurfaceKHR {
        self.handle
    }

    pub(crate) fn loader(&self) -> &surface::Instance {
        &self.loader
    }
}

impl Drop for Surface<'_> {
    fn drop(&mut self) {
        debug!("Dropping surface {:?}", self.handle);
        unsafe { self.loader.destroy_surface(self.handle, None) };
    }
}

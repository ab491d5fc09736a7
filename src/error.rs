use ash::vk;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not load Vulkan: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("{context}: {} ({})", .code.as_raw(), result_name(*.code))]
    DriverQuery {
        context: &'static str,
        code: vk::Result,
    },

    #[error("{what} count was zero")]
    EmptyResult { what: &'static str },

    #[error("{context}: {} ({name})", .code.as_raw())]
    DriverCreate {
        context: &'static str,
        code: vk::Result,
        name: &'static str,
    },

    #[error("Not all extensions found: {missing}")]
    UnsatisfiedRequirement { missing: String },

    #[error("Window layer query failed: {reason}")]
    WindowQuery { reason: String },

    #[error("Could not create surface with window {window}: {reason}")]
    SurfaceCreate { window: String, reason: String },

    #[error("Driver returned an unterminated {0}")]
    UnterminatedString(&'static str),

    #[error("Name contains an interior nul byte: {0}")]
    InvalidName(#[from] std::ffi::NulError),
}

impl Error {
    pub(crate) fn query(context: &'static str) -> impl FnOnce(vk::Result) -> Self {
        move |code| Self::DriverQuery { context, code }
    }

    pub(crate) fn create(context: &'static str) -> impl FnOnce(vk::Result) -> Self {
        move |code| Self::DriverCreate {
            context,
            code,
            name: result_name(code),
        }
    }

    pub fn code(&self) -> Option<vk::Result> {
        match self {
            Self::DriverQuery { code, .. } | Self::DriverCreate { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn enum_name(&self) -> &'static str {
        self.code().map_or(UNKNOWN_RESULT, result_name)
    }
}

pub const UNKNOWN_RESULT: &str = "???";

static RESULT_NAMES: &[(vk::Result, &str)] = &[
    (vk::Result::SUCCESS, "VK_SUCCESS"),
    (vk::Result::NOT_READY, "VK_NOT_READY"),
    (vk::Result::TIMEOUT, "VK_TIMEOUT"),
    (vk::Result::EVENT_SET, "VK_EVENT_SET"),
    (vk::Result::EVENT_RESET, "VK_EVENT_RESET"),
    (vk::Result::INCOMPLETE, "VK_INCOMPLETE"),
    (vk::Result::ERROR_OUT_OF_HOST_MEMORY, "VK_ERROR_OUT_OF_HOST_MEMORY"),
    (vk::Result::ERROR_OUT_OF_DEVICE_MEMORY, "VK_ERROR_OUT_OF_DEVICE_MEMORY"),
    (vk::Result::ERROR_INITIALIZATION_FAILED, "VK_ERROR_INITIALIZATION_FAILED"),
    (vk::Result::ERROR_DEVICE_LOST, "VK_ERROR_DEVICE_LOST"),
    (vk::Result::ERROR_MEMORY_MAP_FAILED, "VK_ERROR_MEMORY_MAP_FAILED"),
    (vk::Result::ERROR_LAYER_NOT_PRESENT, "VK_ERROR_LAYER_NOT_PRESENT"),
    (vk::Result::ERROR_EXTENSION_NOT_PRESENT, "VK_ERROR_EXTENSION_NOT_PRESENT"),
    (vk::Result::ERROR_FEATURE_NOT_PRESENT, "VK_ERROR_FEATURE_NOT_PRESENT"),
    (vk::Result::ERROR_INCOMPATIBLE_DRIVER, "VK_ERROR_INCOMPATIBLE_DRIVER"),
    (vk::Result::ERROR_TOO_MANY_OBJECTS, "VK_ERROR_TOO_MANY_OBJECTS"),
    (vk::Result::ERROR_FORMAT_NOT_SUPPORTED, "VK_ERROR_FORMAT_NOT_SUPPORTED"),
    (vk::Result::ERROR_FRAGMENTED_POOL, "VK_ERROR_FRAGMENTED_POOL"),
    (vk::Result::ERROR_UNKNOWN, "VK_ERROR_UNKNOWN"),
    (vk::Result::ERROR_OUT_OF_POOL_MEMORY, "VK_ERROR_OUT_OF_POOL_MEMORY"),
    (vk::Result::ERROR_INVALID_EXTERNAL_HANDLE, "VK_ERROR_INVALID_EXTERNAL_HANDLE"),
    (vk::Result::ERROR_FRAGMENTATION, "VK_ERROR_FRAGMENTATION"),
    (
        vk::Result::ERROR_INVALID_OPAQUE_CAPTURE_ADDRESS,
        "VK_ERROR_INVALID_OPAQUE_CAPTURE_ADDRESS",
    ),
    (vk::Result::ERROR_SURFACE_LOST_KHR, "VK_ERROR_SURFACE_LOST_KHR"),
    (vk::Result::ERROR_NATIVE_WINDOW_IN_USE_KHR, "VK_ERROR_NATIVE_WINDOW_IN_USE_KHR"),
    (vk::Result::SUBOPTIMAL_KHR, "VK_SUBOPTIMAL_KHR"),
    (vk::Result::ERROR_OUT_OF_DATE_KHR, "VK_ERROR_OUT_OF_DATE_KHR"),
    (vk::Result::ERROR_INCOMPATIBLE_DISPLAY_KHR, "VK_ERROR_INCOMPATIBLE_DISPLAY_KHR"),
    (vk::Result::ERROR_VALIDATION_FAILED_EXT, "VK_ERROR_VALIDATION_FAILED_EXT"),
    (vk::Result::ERROR_INVALID_SHADER_NV, "VK_ERROR_INVALID_SHADER_NV"),
    (
        vk::Result::from_raw(-1_000_158_000),
        "VK_ERROR_INVALID_DRM_FORMAT_MODIFIER_PLANE_LAYOUT_EXT",
    ),
    (vk::Result::from_raw(-1_000_174_001), "VK_ERROR_NOT_PERMITTED_EXT"),
    (
        vk::Result::from_raw(-1_000_255_000),
        "VK_ERROR_FULL_SCREEN_EXCLUSIVE_MODE_LOST_EXT",
    ),
    (vk::Result::from_raw(1_000_268_000), "VK_THREAD_IDLE_KHR"),
    (vk::Result::from_raw(1_000_268_001), "VK_THREAD_DONE_KHR"),
    (vk::Result::from_raw(1_000_268_002), "VK_OPERATION_DEFERRED_KHR"),
    (vk::Result::from_raw(1_000_268_003), "VK_OPERATION_NOT_DEFERRED_KHR"),
    (vk::Result::from_raw(1_000_297_000), "VK_PIPELINE_COMPILE_REQUIRED_EXT"),
];

pub fn result_name(code: vk::Result) -> &'static str {
    RESULT_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(UNKNOWN_RESULT, |(_, name)| name)
}

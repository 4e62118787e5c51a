pub mod in_process;
pub mod manifest;
pub mod types;

pub use types::WidgetHost;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub use android::AndroidWidgetHost as NativeWidgetHost;

#[cfg(target_os = "ios")]
pub use ios::IosWidgetHost as NativeWidgetHost;

// Desktop builds have no OS widget host; bindings are recorded in-process
#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub use in_process::InProcessWidgetHost as NativeWidgetHost;

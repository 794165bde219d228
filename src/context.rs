//! Where the client code is executing.

/// Runtime the telemetry client is executing in.
///
/// Browser execution is recognised by a `window` global; anything without one
/// (native processes, edge workers, Node-like runtimes) is a server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionContext {
    Browser,
    #[default]
    Server,
}

impl ExecutionContext {
    /// Detect the context of the current process.
    pub fn detect() -> Self {
        if has_window_global() {
            ExecutionContext::Browser
        } else {
            ExecutionContext::Server
        }
    }

    pub fn is_browser(&self) -> bool {
        matches!(self, ExecutionContext::Browser)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionContext::Browser => "browser",
            ExecutionContext::Server => "server",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "browser" => Some(ExecutionContext::Browser),
            "server" => Some(ExecutionContext::Server),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn has_window_global() -> bool {
    let key = js_sys::JsString::from("window");
    js_sys::Reflect::has(&js_sys::global(), &key).unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn has_window_global() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_processes_are_servers() {
        assert_eq!(ExecutionContext::detect(), ExecutionContext::Server);
        assert!(!ExecutionContext::detect().is_browser());
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            ExecutionContext::from_name("Browser"),
            Some(ExecutionContext::Browser)
        );
        assert_eq!(
            ExecutionContext::from_name("SERVER"),
            Some(ExecutionContext::Server)
        );
        assert_eq!(ExecutionContext::from_name("edge"), None);
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::driver::AutomationDriver;
use crate::error::DispatchError;

use super::transform::transform_parameters;

/// Category a tool belongs to, mirroring the recorder's tool palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    UiInteraction,
    Xpath,
    Scrolling,
    AppControl,
    ScreenControl,
    Gesture,
    System,
    Notification,
    Wait,
    Advanced,
    Watcher,
}

/// Static description of one replayable tool: its name, a human-readable
/// signature used for diagnostics, and its palette category.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub signature: &'static str,
    pub category: ToolCategory,
}

/// The fixed vocabulary of recordable tools (48 entries).
const TOOL_TABLE: &[ToolSpec] = &[
    // UI interaction
    spec("click", "(selector, selector_type='text', timeout_ms=10000)", ToolCategory::UiInteraction),
    spec("long_click", "(selector, selector_type='text', duration_ms=1000)", ToolCategory::UiInteraction),
    spec("double_click", "(selector, selector_type='text')", ToolCategory::UiInteraction),
    spec("send_text", "(selector, text, clear=true)", ToolCategory::UiInteraction),
    spec("swipe", "(direction, scale=0.9)", ToolCategory::UiInteraction),
    spec("drag", "(from_x, from_y, to_x, to_y, duration_ms=500)", ToolCategory::UiInteraction),
    spec("click_at", "(x, y)", ToolCategory::UiInteraction),
    spec("double_click_at", "(x, y)", ToolCategory::UiInteraction),
    spec("screenshot", "(filename)", ToolCategory::UiInteraction),
    spec("wait_for_element", "(selector, selector_type='text', timeout_ms=10000)", ToolCategory::UiInteraction),
    // XPath
    spec("click_xpath", "(xpath, timeout_ms=10000)", ToolCategory::Xpath),
    spec("long_click_xpath", "(xpath, duration_ms=1000)", ToolCategory::Xpath),
    spec("send_text_xpath", "(xpath, text, clear=true)", ToolCategory::Xpath),
    spec("wait_xpath", "(xpath, timeout_ms=10000)", ToolCategory::Xpath),
    // Scrolling
    spec("scroll_to", "(selector, selector_type='text', max_swipes=10)", ToolCategory::Scrolling),
    spec("scroll_forward", "(steps=1)", ToolCategory::Scrolling),
    spec("scroll_backward", "(steps=1)", ToolCategory::Scrolling),
    spec("scroll_to_beginning", "()", ToolCategory::Scrolling),
    spec("scroll_to_end", "()", ToolCategory::Scrolling),
    spec("fling_forward", "()", ToolCategory::Scrolling),
    spec("fling_backward", "()", ToolCategory::Scrolling),
    // App control
    spec("start_app", "(package, activity=None, wait=true)", ToolCategory::AppControl),
    spec("stop_app", "(package)", ToolCategory::AppControl),
    spec("stop_all_apps", "()", ToolCategory::AppControl),
    spec("install_app", "(apk_path)", ToolCategory::AppControl),
    spec("uninstall_app", "(package)", ToolCategory::AppControl),
    spec("clear_app_data", "(package)", ToolCategory::AppControl),
    // Screen control
    spec("press_key", "(key)", ToolCategory::ScreenControl),
    spec("screen_on", "()", ToolCategory::ScreenControl),
    spec("screen_off", "()", ToolCategory::ScreenControl),
    spec("unlock_screen", "()", ToolCategory::ScreenControl),
    spec("set_orientation", "(orientation)", ToolCategory::ScreenControl),
    spec("freeze_rotation", "(freeze=true)", ToolCategory::ScreenControl),
    // Gestures
    spec("pinch_in", "(percent=100, steps=50)", ToolCategory::Gesture),
    spec("pinch_out", "(percent=100, steps=50)", ToolCategory::Gesture),
    // System
    spec("set_clipboard", "(text, label=None)", ToolCategory::System),
    spec("pull_file", "(device_path, local_path)", ToolCategory::System),
    spec("push_file", "(local_path, device_path)", ToolCategory::System),
    // Notifications & popups
    spec("open_notification", "()", ToolCategory::Notification),
    spec("open_quick_settings", "()", ToolCategory::Notification),
    spec("disable_popups", "(enable=true)", ToolCategory::Notification),
    // Waits
    spec("wait_activity", "(activity, timeout_ms=10000)", ToolCategory::Wait),
    // Advanced
    spec("healthcheck", "()", ToolCategory::Advanced),
    spec("reset_uiautomator", "()", ToolCategory::Advanced),
    spec("send_action", "(action=None)", ToolCategory::Advanced),
    // Watchers
    spec("watcher_start", "(name, conditions)", ToolCategory::Watcher),
    spec("watcher_stop", "(name)", ToolCategory::Watcher),
    spec("watcher_remove", "(name=None)", ToolCategory::Watcher),
];

const fn spec(
    name: &'static str,
    signature: &'static str,
    category: ToolCategory,
) -> ToolSpec {
    ToolSpec {
        name,
        signature,
        category,
    }
}

/// Builds the read-only tool registry once, at startup.
pub struct DispatcherBuilder {
    driver: Arc<dyn AutomationDriver>,
    tools: BTreeMap<&'static str, ToolSpec>,
}

impl DispatcherBuilder {
    pub fn new(driver: Arc<dyn AutomationDriver>) -> Self {
        Self {
            driver,
            tools: BTreeMap::new(),
        }
    }

    /// Register every tool in the fixed vocabulary.
    pub fn with_all_tools(mut self) -> Self {
        for tool in TOOL_TABLE {
            self.tools.insert(tool.name, *tool);
        }
        self
    }

    /// Register a single tool spec. Used by tests to build narrow registries.
    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.insert(tool.name, tool);
        self
    }

    pub fn build(self) -> ActionDispatcher {
        ActionDispatcher {
            driver: self.driver,
            tools: self.tools,
        }
    }
}

/// Maps a symbolic tool name to an automation-driver invocation.
///
/// The registry is read-only after construction and safe to share across
/// replay runs driving different targets.
pub struct ActionDispatcher {
    driver: Arc<dyn AutomationDriver>,
    tools: BTreeMap<&'static str, ToolSpec>,
}

impl ActionDispatcher {
    /// Dispatcher over the full 48-tool vocabulary.
    pub fn new(driver: Arc<dyn AutomationDriver>) -> Self {
        DispatcherBuilder::new(driver).with_all_tools().build()
    }

    /// Resolve `tool_name` and invoke it against `target_id`.
    ///
    /// The caller's parameter map is never mutated; the driver receives a
    /// transformed copy. Driver return values are relayed unchanged.
    pub async fn dispatch(
        &self,
        tool_name: &str,
        parameters: &Map<String, Value>,
        target_id: &str,
    ) -> Result<Value, DispatchError> {
        if !self.tools.contains_key(tool_name) {
            return Err(self.unsupported(tool_name));
        }

        let transformed = transform_parameters(tool_name, parameters);

        self.driver
            .invoke(tool_name, &transformed, target_id)
            .await
            .map_err(|fault| DispatchError::Driver {
                tool: tool_name.to_string(),
                fault,
            })
    }

    pub fn is_supported(&self, tool_name: &str) -> bool {
        self.tools.contains_key(tool_name)
    }

    /// Sorted list of every registered tool name.
    pub fn supported_tools(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    /// Human-readable signature for a tool; same unsupported-tool semantics
    /// as `dispatch`.
    pub fn tool_signature(&self, tool_name: &str) -> Result<&'static str, DispatchError> {
        self.tools
            .get(tool_name)
            .map(|t| t.signature)
            .ok_or_else(|| self.unsupported(tool_name))
    }

    fn unsupported(&self, tool_name: &str) -> DispatchError {
        DispatchError::UnsupportedTool {
            tool: tool_name.to_string(),
            supported: self.supported_tools(),
        }
    }
}

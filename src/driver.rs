use crate::config::SearchConfig;
use crate::error::ScrapeError;
use crate::utils::pause;
use crate::Result;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use serde_json::Value;
use std::ffi::OsString;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

const VISIBILITY_POLL: Duration = Duration::from_millis(100);

const IS_RENDERED_JS: &str = "function() { return this.offsetParent !== null; }";
const INNER_HTML_JS: &str = "function() { return this.innerHTML; }";
const CLEAR_VALUE_JS: &str = "function() { this.value = ''; }";

/// Owned reference to a DOM node in the driven page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    pub node_id: u32,
}

impl ElementHandle {
    pub fn new(node_id: u32) -> Self {
        Self { node_id }
    }
}

/// Browser capabilities the crawler relies on. One session, used sequentially.
pub trait BrowserDriver {
    fn navigate(&self, url: &str) -> Result<()>;

    /// `Ok(None)` when nothing matches.
    fn find_element(&self, selector: &str) -> Result<Option<ElementHandle>>;

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle>>;

    fn click(&self, element: &ElementHandle) -> Result<()>;

    /// Replaces the current value of an input.
    fn type_text(&self, element: &ElementHandle, text: &str) -> Result<()>;

    /// Runs a function declaration, bound to `target` when given, and returns its
    /// serializable result.
    fn execute_script(&self, script: &str, target: Option<&ElementHandle>) -> Result<Option<Value>>;

    fn read_inner_content(&self, element: &ElementHandle) -> Result<Option<String>>;

    /// Whether the element takes part in layout, i.e. has an offset parent.
    fn is_rendered(&self, element: &ElementHandle) -> Result<bool> {
        let value = self.execute_script(IS_RENDERED_JS, Some(element))?;
        Ok(matches!(value, Some(Value::Bool(true))))
    }

    fn wait_until_visible(&self, selector: &str, timeout: Duration) -> Result<ElementHandle> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = self.find_element(selector)? {
                if self.is_rendered(&element)? {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::VisibilityTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            pause(VISIBILITY_POLL);
        }
    }
}

/// Chrome session over one tab. The browser process is closed on drop.
pub struct ChromeDriver {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeDriver {
    pub fn launch(search: &SearchConfig, default_timeout: Duration) -> Result<Self> {
        let user_agent = OsString::from(format!("--user-agent={}", search.user_agent));
        let automation = OsString::from("--disable-blink-features=AutomationControlled");

        let browser = Browser::new(LaunchOptions {
            headless: search.headless,
            path: search.chrome_path.clone(),
            window_size: Some((1366, 900)),
            idle_browser_timeout: Duration::from_secs(600),
            args: vec![user_agent.as_os_str(), automation.as_os_str()],
            ..Default::default()
        })?;

        let tab = browser.new_tab()?;
        tab.set_default_timeout(default_timeout);
        debug!(headless = search.headless, "browser launched");

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn element(&self, handle: &ElementHandle) -> Result<Element<'_>> {
        Ok(Element::new(&self.tab, handle.node_id)?)
    }
}

impl BrowserDriver for ChromeDriver {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url)?.wait_until_navigated()?;
        Ok(())
    }

    fn find_element(&self, selector: &str) -> Result<Option<ElementHandle>> {
        match self.tab.find_element(selector) {
            Ok(element) => Ok(Some(ElementHandle::new(element.node_id))),
            Err(err) => {
                debug!(selector, error = %err, "element lookup missed");
                Ok(None)
            }
        }
    }

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle>> {
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(elements
                .iter()
                .map(|element| ElementHandle::new(element.node_id))
                .collect()),
            Err(err) => {
                debug!(selector, error = %err, "element lookup missed");
                Ok(Vec::new())
            }
        }
    }

    fn click(&self, element: &ElementHandle) -> Result<()> {
        self.element(element)?.click()?;
        Ok(())
    }

    fn type_text(&self, element: &ElementHandle, text: &str) -> Result<()> {
        let element = self.element(element)?;
        element.call_js_fn(CLEAR_VALUE_JS, vec![], false)?;
        if !text.is_empty() {
            element.type_into(text)?;
        }
        Ok(())
    }

    fn execute_script(&self, script: &str, target: Option<&ElementHandle>) -> Result<Option<Value>> {
        let object = match target {
            Some(handle) => self.element(handle)?.call_js_fn(script, vec![], false)?,
            None => self.tab.evaluate(&format!("({script})()"), false)?,
        };
        Ok(object.value)
    }

    fn read_inner_content(&self, element: &ElementHandle) -> Result<Option<String>> {
        let value = self.execute_script(INNER_HTML_JS, Some(element))?;
        Ok(value.and_then(|value| value.as_str().map(str::to_owned)))
    }
}

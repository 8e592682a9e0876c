//! Browser automation seam.
//!
//! A [`Launcher`] starts a [`Browser`], which opens [`Page`]s. Both browser
//! and page are released by consuming `close`, so each is closed at most
//! once. [`webdriver`] drives a real Chromium through fantoccini.

pub mod webdriver;

use crate::error::Result;
use std::future::Future;

pub use webdriver::{WebDriverBrowser, WebDriverLauncher, WebDriverPage};

/// Starts browser instances
pub trait Launcher: Send + Sync {
    type Browser: Browser;

    fn launch(&self) -> impl Future<Output = Result<Self::Browser>> + Send;
}

/// A running browser
pub trait Browser: Send {
    type Page: Page;

    /// Open a fresh page (tab)
    fn new_page(&mut self) -> impl Future<Output = Result<Self::Page>> + Send;

    /// Shut the browser down
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// One page (tab) of a running browser
pub trait Page: Send {
    /// Navigate and wait until the load settles
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<()>> + Send;

    /// Serialized HTML of the rendered DOM
    fn content(&mut self) -> impl Future<Output = Result<String>> + Send;

    /// URL currently loaded, after redirects
    fn url(&mut self) -> impl Future<Output = Result<String>> + Send;

    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

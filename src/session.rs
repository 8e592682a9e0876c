use crate::browser::{Browser, Launcher, Page};
use crate::error::Result;

/// A browser with one open page, owned by a single scrape.
///
/// Created by [`Session::open`] and consumed by [`Session::close`], which
/// closes the page and then the browser.
pub struct Session<B: Browser> {
    browser: B,
    page: B::Page,
}

impl<B: Browser> Session<B> {
    /// Launch a browser and open a page; the browser is closed again if the
    /// page cannot be opened
    pub async fn open<L>(launcher: &L) -> Result<Self>
    where
        L: Launcher<Browser = B>,
    {
        let mut browser = launcher.launch().await?;
        ::log::info!("Created browser");

        match browser.new_page().await {
            Ok(page) => {
                ::log::info!("Created new page");
                Ok(Self { browser, page })
            }
            Err(e) => {
                ::log::error!("Failed to open page: {}", e);
                if let Err(close_err) = browser.close().await {
                    ::log::warn!("Failed to close browser: {}", close_err);
                }
                Err(e)
            }
        }
    }

    pub fn page_mut(&mut self) -> &mut B::Page {
        &mut self.page
    }

    /// Close the page, then the browser. Both are attempted even if the
    /// first fails; the first failure is returned.
    pub async fn close(self) -> Result<()> {
        let Session { browser, page } = self;

        let page_result = page.close().await;
        match &page_result {
            Ok(()) => ::log::debug!("Closed page"),
            Err(e) => ::log::warn!("Failed to close page: {}", e),
        }

        let browser_result = browser.close().await;
        match &browser_result {
            Ok(()) => ::log::debug!("Closed browser"),
            Err(e) => ::log::warn!("Failed to close browser: {}", e),
        }

        page_result.and(browser_result)
    }
}

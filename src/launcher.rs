use async_trait::async_trait;

/// Where a newly opened resource ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Open and switch to it; used for single execution.
    Foreground,
    /// Open without stealing focus; used for every entity of a batch.
    Background,
}

/// Opens URLs on behalf of plugins.
#[async_trait]
pub trait Opener: Send + Sync {
    async fn open(&self, url: &str, focus: Focus) -> anyhow::Result<()>;
}

/// Hands URLs to the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

#[async_trait]
impl Opener for SystemOpener {
    async fn open(&self, url: &str, focus: Focus) -> anyhow::Result<()> {
        // The desktop handler decides focus on its own.
        tracing::info!(url, ?focus, "open");
        open::that_detached(url)?;
        Ok(())
    }
}

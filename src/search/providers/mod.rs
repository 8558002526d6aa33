pub mod internet_archive;
pub mod mixcloud;
pub mod soundcloud;
pub mod youtube;

pub use internet_archive::InternetArchiveProvider;
pub use mixcloud::MixcloudProvider;
pub use soundcloud::SoundCloudProvider;
pub use youtube::YouTubeProvider;

use crate::config::SearchConfig;
use crate::search::SearchProvider;
use crate::transport::Transport;
use std::sync::Arc;

/// Build the enabled adapters in their fixed display order
pub fn from_config(
    config: &SearchConfig,
    transport: Arc<dyn Transport>,
) -> Vec<Arc<dyn SearchProvider>> {
    let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();

    if config.youtube.enabled {
        providers.push(Arc::new(YouTubeProvider::new(&config.youtube, transport.clone())));
    }
    if config.soundcloud.enabled {
        providers.push(Arc::new(SoundCloudProvider::new(&config.soundcloud, transport.clone())));
    }
    if config.mixcloud.enabled {
        providers.push(Arc::new(MixcloudProvider::new(&config.mixcloud, transport.clone())));
    }
    if config.internet_archive.enabled {
        providers.push(Arc::new(InternetArchiveProvider::new(&config.internet_archive, transport)));
    }

    providers
}

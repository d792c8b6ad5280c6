use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{AppConfig, FFmpegLocator, ProbeLibavAdapter};
use crate::app::{cut_interactor::CutInteractor, inspect_interactor::InspectInteractor};
use crate::engine::EngineConfig;
use crate::error::ClipperResult;
use crate::output::OutputLayout;
use crate::ports::{EncoderProvider, ProbePort};

pub trait AppContainer: Send + Sync {
    fn cut_interactor(&self) -> Arc<CutInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    cut_interactor: Arc<CutInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    /// Wire the libav probe and the FFmpeg locator from a resolved configuration
    pub fn new(config: &AppConfig) -> ClipperResult<Self> {
        let probe_port = Arc::new(ProbeLibavAdapter::new()?);
        let encoders = Arc::new(FFmpegLocator::new(
            config.encoder.ffmpeg_path.clone(),
            config.encoder.timeout_secs.map(Duration::from_secs),
        ));
        Ok(Self::with_ports(probe_port, encoders, config))
    }

    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        encoders: Arc<dyn EncoderProvider>,
        config: &AppConfig,
    ) -> Self {
        let layout = OutputLayout::new(&config.output.base_dir);

        let cut_interactor = Arc::new(CutInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&encoders),
            layout.clone(),
            EngineConfig::from_settings(&config.encoder),
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(probe_port, encoders, layout));

        Self {
            cut_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn cut_interactor(&self) -> Arc<CutInteractor> {
        Arc::clone(&self.cut_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}

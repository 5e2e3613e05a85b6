use log::{debug, error, info};

use crate::{
    errors::RemoteError,
    media::MediaSource,
    request::Requester,
};

/// Amount sent with every volume step.
pub const VOLUME_STEP: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

impl PlaybackState {
    /// Label of the action that leaves this state.
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Stopped => "start",
            PlaybackState::Playing => "stop",
        }
    }
}

/// What the playback controller renders into.
pub trait PlaybackView {
    fn add_option(&mut self, source: &MediaSource);
    /// Single selection: selecting a link deselects any previous one.
    fn select(&mut self, link: &str);
    fn selected_link(&self) -> Option<String>;
    fn set_volume(&mut self, level: u16);
    fn show_state(&mut self, state: PlaybackState);
    fn show_error(&mut self, error: &RemoteError);
}

/// The source that should be selected after loading: the playing one,
/// or the server's default when nothing plays.
pub fn select_initial(sources: &[MediaSource]) -> Option<&MediaSource> {
    sources
        .iter()
        .rev()
        .find(|s| s.currently_playing)
        .or_else(|| sources.iter().rev().find(|s| s.default_source))
}

pub struct PlaybackController<R: Requester> {
    requester: R,
    state: PlaybackState,
}

impl<R: Requester> PlaybackController<R> {
    pub fn new(requester: R) -> Self {
        PlaybackController {
            requester,
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Fetches sources and volume and renders them.
    pub async fn load<V: PlaybackView>(
        &mut self,
        view: &mut V,
    ) -> Result<Vec<MediaSource>, RemoteError> {
        info!("loading media");
        let raw = self.requester.get("/media").await?;
        let sources: Vec<MediaSource> = serde_json::from_str(&raw)?;
        for source in &sources {
            debug!("{:?}", source);
            view.add_option(source);
        }

        if let Some(selected) = select_initial(&sources) {
            view.select(&selected.link);
        }
        if sources.iter().any(|s| s.currently_playing) {
            self.state = PlaybackState::Playing;
        }
        view.show_state(self.state);

        let raw = self.requester.get("/volume").await?;
        let volume: u16 = raw.trim().parse()?;
        info!("setting volume to {}", volume);
        view.set_volume(volume);

        Ok(sources)
    }

    /// Persists a new volume level, as when the slider moves.
    pub async fn set_volume(&self, level: u16) -> Result<(), RemoteError> {
        self.requester
            .put("/volume", Some(level.to_string()), &[])
            .await?;
        Ok(())
    }

    pub async fn toggle<V: PlaybackView>(&mut self, view: &mut V) -> Result<(), RemoteError> {
        match self.state {
            PlaybackState::Playing => self.stop(view).await,
            PlaybackState::Stopped => self.start(view).await,
        }
    }

    pub async fn start<V: PlaybackView>(&mut self, view: &mut V) -> Result<(), RemoteError> {
        let result = match view.selected_link() {
            Some(url) => {
                info!("starting playback of {}", &url);
                self.requester
                    .post("/start", Some(url), &[])
                    .await
                    .map_err(RemoteError::from)
            }
            None => Err(RemoteError::NoSelection),
        };
        self.settle(view, result.map(|_| PlaybackState::Playing))
    }

    pub async fn stop<V: PlaybackView>(&mut self, view: &mut V) -> Result<(), RemoteError> {
        info!("stopping playback");
        let result = self
            .requester
            .post("/stop", None, &[])
            .await
            .map_err(RemoteError::from);
        self.settle(view, result.map(|_| PlaybackState::Stopped))
    }

    pub async fn increase_volume(&self) -> Result<(), RemoteError> {
        self.requester
            .post("/increase_volume", Some(VOLUME_STEP.to_string()), &[])
            .await?;
        Ok(())
    }

    pub async fn decrease_volume(&self) -> Result<(), RemoteError> {
        self.requester
            .post("/decrease_volume", Some(VOLUME_STEP.to_string()), &[])
            .await?;
        Ok(())
    }

    // state only moves once the server confirmed the action
    fn settle<V: PlaybackView>(
        &mut self,
        view: &mut V,
        result: Result<PlaybackState, RemoteError>,
    ) -> Result<(), RemoteError> {
        match result {
            Ok(state) => {
                self.state = state;
                view.show_state(state);
                Ok(())
            }
            Err(e) => {
                error!("playback action failed: {}", e);
                view.show_error(&e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use awc::http::Method;

    use super::*;
    use crate::{media::MediaType, request::testing::FakeRequester};

    #[derive(Default)]
    struct RecordingView {
        options: Vec<String>,
        selected: Option<String>,
        volume: Option<u16>,
        label: Option<&'static str>,
        errors: Vec<String>,
    }

    impl PlaybackView for RecordingView {
        fn add_option(&mut self, source: &MediaSource) {
            self.options.push(source.link.clone());
        }
        fn select(&mut self, link: &str) {
            self.selected = Some(link.to_string());
        }
        fn selected_link(&self) -> Option<String> {
            self.selected.clone()
        }
        fn set_volume(&mut self, level: u16) {
            self.volume = Some(level);
        }
        fn show_state(&mut self, state: PlaybackState) {
            self.label = Some(state.label());
        }
        fn show_error(&mut self, error: &RemoteError) {
            self.errors.push(error.to_string());
        }
    }

    fn source(name: &str, default_source: bool, currently_playing: bool) -> MediaSource {
        MediaSource {
            name: name.into(),
            link: format!("http://{}", name),
            media_type: MediaType::Radio,
            default_source,
            currently_playing,
        }
    }

    fn serving(sources: &[MediaSource], volume: &str) -> FakeRequester {
        let fake = FakeRequester::default();
        fake.respond(
            Method::GET,
            "/media",
            Ok(serde_json::to_string(sources).unwrap()),
        );
        fake.respond(Method::GET, "/volume", Ok(volume.into()));
        fake
    }

    #[test]
    fn playing_source_wins_over_default() {
        let sources = vec![
            source("a", true, false),
            source("b", false, true),
            source("c", true, false),
        ];
        assert_eq!(select_initial(&sources).unwrap().name, "b");
        assert_eq!(select_initial(&sources[..1]).unwrap().name, "a");
        assert!(select_initial(&[source("d", false, false)]).is_none());
    }

    #[actix_web::test]
    async fn load_selects_default_when_nothing_plays() {
        let sources = vec![source("a", false, false), source("b", true, false)];
        let mut controller = PlaybackController::new(serving(&sources, "42\n"));
        let mut view = RecordingView::default();

        let loaded = controller.load(&mut view).await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(view.options, vec!["http://a", "http://b"]);
        assert_eq!(view.selected.as_deref(), Some("http://b"));
        assert_eq!(view.volume, Some(42));
        assert_eq!(view.label, Some("start"));
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[actix_web::test]
    async fn load_marks_playing_source() {
        let sources = vec![
            source("a", true, false),
            source("b", false, true),
            source("c", true, false),
        ];
        let mut controller = PlaybackController::new(serving(&sources, "80"));
        let mut view = RecordingView::default();

        controller.load(&mut view).await.unwrap();

        assert_eq!(view.selected.as_deref(), Some("http://b"));
        assert_eq!(view.label, Some("stop"));
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[actix_web::test]
    async fn load_rejects_malformed_volume() {
        let mut controller = PlaybackController::new(serving(&[], "loud"));
        let mut view = RecordingView::default();

        let err = controller.load(&mut view).await.unwrap_err();
        assert!(matches!(err, RemoteError::ParseInt(_)));
    }

    #[actix_web::test]
    async fn toggle_starts_then_stops() {
        let sources = vec![source("a", true, false)];
        let mut controller = PlaybackController::new(serving(&sources, "10"));
        let mut view = RecordingView::default();
        controller.load(&mut view).await.unwrap();

        controller.toggle(&mut view).await.unwrap();
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(view.label, Some("stop"));

        controller.toggle(&mut view).await.unwrap();
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(view.label, Some("start"));

        let calls = controller.requester().calls();
        assert_eq!(calls[2].method, Method::POST);
        assert_eq!(calls[2].path, "/start");
        assert_eq!(calls[2].body.as_deref(), Some("http://a"));
        assert_eq!(calls[3].path, "/stop");
        assert_eq!(calls[3].body, None);
    }

    #[actix_web::test]
    async fn failed_start_keeps_state_and_reports() {
        let sources = vec![source("a", true, false)];
        let fake = serving(&sources, "10");
        fake.fail(Method::POST, "/start", 500);
        let mut controller = PlaybackController::new(fake);
        let mut view = RecordingView::default();
        controller.load(&mut view).await.unwrap();

        let err = controller.toggle(&mut view).await.unwrap_err();

        assert!(matches!(err, RemoteError::Request(ref e) if e.status == 500));
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(view.label, Some("start"));
        assert_eq!(view.errors.len(), 1);
    }

    #[actix_web::test]
    async fn failed_stop_keeps_playing() {
        let sources = vec![source("a", false, true)];
        let fake = serving(&sources, "10");
        fake.fail(Method::POST, "/stop", 503);
        let mut controller = PlaybackController::new(fake);
        let mut view = RecordingView::default();
        controller.load(&mut view).await.unwrap();

        assert!(controller.toggle(&mut view).await.is_err());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[actix_web::test]
    async fn start_without_selection_sends_nothing() {
        let mut controller = PlaybackController::new(FakeRequester::default());
        let mut view = RecordingView::default();

        let err = controller.start(&mut view).await.unwrap_err();

        assert!(matches!(err, RemoteError::NoSelection));
        assert!(controller.requester().calls().is_empty());
        assert_eq!(view.errors.len(), 1);
    }

    #[actix_web::test]
    async fn volume_controls() {
        let controller = PlaybackController::new(FakeRequester::default());

        controller.increase_volume().await.unwrap();
        controller.decrease_volume().await.unwrap();
        controller.set_volume(55).await.unwrap();

        let calls = controller.requester().calls();
        assert_eq!(calls[0].path, "/increase_volume");
        assert_eq!(calls[0].body.as_deref(), Some("10"));
        assert_eq!(calls[1].path, "/decrease_volume");
        assert_eq!(calls[1].body.as_deref(), Some("10"));
        assert_eq!(calls[2].method, Method::PUT);
        assert_eq!(calls[2].path, "/volume");
        assert_eq!(calls[2].body.as_deref(), Some("55"));
    }
}

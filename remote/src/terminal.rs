use std::str::FromStr;

use crate::{
    controller::{PlaybackState, PlaybackView},
    errors::RemoteError,
    form::FormView,
    media::MediaSource,
};

/// Playback view kept in memory and printed to stdout on demand.
#[derive(Default)]
pub struct TerminalView {
    sources: Vec<MediaSource>,
    selected: Option<usize>,
    volume: Option<u16>,
    state: PlaybackState,
}

impl TerminalView {
    pub fn sources(&self) -> &[MediaSource] {
        &self.sources
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> Option<u16> {
        self.volume
    }

    /// Selects the n-th entry, counting from 1.
    pub fn select_index(&mut self, n: usize) -> Result<(), RemoteError> {
        if n == 0 || n > self.sources.len() {
            return Err(RemoteError::UnknownSource(n.to_string()));
        }
        self.selected = Some(n - 1);
        Ok(())
    }

    /// Looks an entry up by exact link or case-insensitive name.
    pub fn find(&self, needle: &str) -> Option<&MediaSource> {
        self.sources
            .iter()
            .find(|s| s.link == needle)
            .or_else(|| {
                self.sources
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(needle))
            })
    }

    pub fn select_by_name(&mut self, needle: &str) -> Result<(), RemoteError> {
        let link = self
            .find(needle)
            .map(|s| s.link.clone())
            .ok_or_else(|| RemoteError::UnknownSource(needle.to_string()))?;
        self.select(&link);
        Ok(())
    }

    pub fn render_sources(&self) -> String {
        let mut out = String::new();
        for (i, source) in self.sources.iter().enumerate() {
            let marker = if source.currently_playing && self.state == PlaybackState::Playing {
                '>'
            } else if self.selected == Some(i) {
                '*'
            } else {
                ' '
            };
            out.push_str(&format!(
                "{} {:>2}. {} [{}] {}\n",
                marker,
                i + 1,
                source.name,
                source.media_type,
                source.link
            ));
        }
        out
    }

    pub fn render_status(&self) -> String {
        let playing = match self.state {
            PlaybackState::Playing => "playing",
            PlaybackState::Stopped => "stopped",
        };
        let volume = self
            .volume
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".into());
        format!("{} | volume {} | next action: {}", playing, volume, self.state.label())
    }
}

impl PlaybackView for TerminalView {
    fn add_option(&mut self, source: &MediaSource) {
        self.sources.push(source.clone());
    }

    fn select(&mut self, link: &str) {
        self.selected = self.sources.iter().position(|s| s.link == link);
    }

    fn selected_link(&self) -> Option<String> {
        self.selected
            .and_then(|i| self.sources.get(i))
            .map(|s| s.link.clone())
    }

    fn set_volume(&mut self, level: u16) {
        self.volume = Some(level);
    }

    fn show_state(&mut self, state: PlaybackState) {
        if state == PlaybackState::Playing {
            let selected = self.selected;
            for (i, source) in self.sources.iter_mut().enumerate() {
                source.currently_playing = Some(i) == selected;
            }
        }
        self.state = state;
    }

    fn show_error(&mut self, error: &RemoteError) {
        eprintln!("error: {}", error);
    }
}

/// Form fields taken from the command line.
pub struct ArgsForm {
    pub name: String,
    pub url: String,
    pub media_type: String,
}

impl FormView for ArgsForm {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    fn clear_text_inputs(&mut self) {
        self.name.clear();
        self.url.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Select(usize),
    Toggle,
    Start,
    Stop,
    Louder,
    Quieter,
    Volume(u16),
    Help,
    Quit,
}

pub const CONSOLE_HELP: &str = "\
commands:
  list        show media sources
  select N    select source number N
  toggle      start or stop playback
  start       start the selected source
  stop        stop playback
  + / -       step the volume up or down
  volume N    set the volume
  help        show this text
  quit        leave";

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();
        match cmd {
            "list" | "ls" => Ok(ConsoleCommand::List),
            "select" => Ok(ConsoleCommand::Select(number(cmd, arg)?)),
            "toggle" | "t" => Ok(ConsoleCommand::Toggle),
            "start" => Ok(ConsoleCommand::Start),
            "stop" => Ok(ConsoleCommand::Stop),
            "+" => Ok(ConsoleCommand::Louder),
            "-" => Ok(ConsoleCommand::Quieter),
            "volume" | "vol" => Ok(ConsoleCommand::Volume(number(cmd, arg)?)),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            other => Err(format!("unknown command {:?}, try help", other)),
        }
    }
}

fn number<T: FromStr>(cmd: &str, arg: Option<&str>) -> Result<T, String> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| format!("{} needs a number", cmd))
}

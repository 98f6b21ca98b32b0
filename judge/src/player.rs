use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::trace;
use triad::{Hand, Request};

use crate::recording::Recorder;

/// How to launch a bot, loaded from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name of the bot.
    pub nick: String,
    /// The program to run, followed by its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: PlayerConfig = serde_json::from_str(&contents)?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A channel to a bot that answers one line of JSON with one line of JSON.
pub trait Connection {
    fn name(&self) -> &str;

    /// Sends one request line and returns the response line, without the newline.
    fn exchange(&mut self, request: &str) -> anyhow::Result<String>;
}

/// A bot running as a child process, talking over stdin/stdout.
pub struct Player {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after exchange().
    buf: String,
}

/// A player together with its hand during one game.
pub struct PlayerWithGameState<'a, C: Connection> {
    pub player: &'a mut C,
    pub hand: Hand,
}

impl Player {
    pub fn new(name: &str, program: &str, args: &[String]) -> anyhow::Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let Some(stdin) = child.stdin.take() else {
            anyhow::bail!("Could not access stdin of '{}'", name);
        };
        let Some(stdout) = child.stdout.take() else {
            anyhow::bail!("Could not access stdout of '{}'", name);
        };
        Ok(Self {
            name: String::from(name),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let Some((program, args)) = config.cmd.split_first() else {
            anyhow::bail!("Player '{}' has an empty cmd", config.nick);
        };
        Self::new(&config.nick, program, args)
    }

    /// Tells the bot to shut down and waits for it to exit.
    pub fn bye(mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.child.wait()?;
        Ok(())
    }
}

impl Connection for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn exchange(&mut self, request: &str) -> anyhow::Result<String> {
        self.stdin.write_all(request.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Player '{}' closed its stdout", self.name);
        }
        let response = String::from(self.buf.trim_end());
        self.buf.clear();
        Ok(response)
    }
}

impl<'a, C: Connection> PlayerWithGameState<'a, C> {
    pub fn new(player: &'a mut C, hand: Hand) -> Self {
        Self { player, hand }
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = self.player.name(), request = %req_json);
        let serialized_response = self.player.exchange(&req_json)?;
        trace!(name: "Received response", player = self.player.name(), response = %serialized_response);
        let response = serde_json::from_str::<T>(&serialized_response)?;

        if let Some(recorder) = recorder {
            recorder.store_request(self.player.name(), req_json, serialized_response);
        }
        Ok(response)
    }
}

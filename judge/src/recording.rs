use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use triad::Rules;

/// Writes every request/response of a game into its own JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

struct RequestToPlayer {
    player: String,
    request: String,
    response: String,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    pub fn store_request(&mut self, player: &str, request: String, response: String) {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request,
            response,
        });
    }

    /// Writes the requests stored since the last call and returns the file path.
    //
    // The request/response are already JSON strings, so they are spliced in
    // as they are instead of being escaped by serde.
    pub fn write_game_recording(&mut self, rules: Rules) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        write!(
            writer,
            "{{\n  \"rules\": {},\n  \"requests\": [",
            serde_json::to_string(&rules)?
        )?;
        let mut first = true;
        for req in std::mem::take(&mut self.requests).into_iter() {
            if !first {
                write!(writer, ",")?;
            } else {
                first = false;
            }
            write!(
                writer,
                "\n    {{\n      \"player\": {},\n      \"request\": {},\n      \"response\": {}\n    }}",
                serde_json::to_string(&req.player)?,
                req.request,
                req.response
            )?;
        }
        write!(writer, "\n  ]\n}}\n")?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

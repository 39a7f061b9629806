//! Interactive command agent
//!
//! Reads commands line by line and acknowledges them. `exit` or `quit`
//! ends the session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const PROMPT: &str = "Agent> ";
pub const BANNER: &str = "[Agent] Started. Awaiting commands... (Press Ctrl+C to exit)";
pub const FAREWELL: &str = "Bye!";
pub const SHUTDOWN: &str = "[Agent] Shutting down.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    Exit,
    Empty,
    Echo(String),
}

impl AgentCommand {
    /// Line to print for this command, if any
    pub fn reply(&self) -> Option<String> {
        match self {
            Self::Exit => Some(FAREWELL.to_string()),
            Self::Empty => None,
            Self::Echo(cmd) => Some(format!("Command received: {cmd}")),
        }
    }
}

/// Classify one input line (without its trailing newline)
pub fn parse_command(line: &str) -> AgentCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        AgentCommand::Empty
    } else if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        AgentCommand::Exit
    } else {
        AgentCommand::Echo(line.to_string())
    }
}

/// Run the prompt loop until `exit`/`quit` or end of input
pub async fn run_session<R, W>(input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("{BANNER}\n").as_bytes()).await?;
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(format!("\n{SHUTDOWN}\n").as_bytes()).await?;
            break;
        };

        let command = parse_command(&line);
        if let Some(reply) = command.reply() {
            output.write_all(format!("{reply}\n").as_bytes()).await?;
        }
        if command == AgentCommand::Exit {
            break;
        }
    }

    output.flush().await
}

use std::io::{self, BufRead, Write};

use crossterm::execute;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use tracing::debug;

use crate::query;

const HELP: &str = "\
  note C#                           spelling and semitone class
  ascend C MAJOR 6                  note an interval above
  descend C MINOR 3                 note an interval below
  scale A MAJOR                     notes and key signature
  scale A MAJOR [SUBMEDIANT]        one scale degree
  scale Gb MAJOR contains F#        membership by spelling
  chord C DOMINANT 7                chord tones
  chord C MAJOR [THIRD]             one chord degree

  help                              show this list
  quit                              leave (or Ctrl-D)
";

/// Run the interactive prompt until `quit` or end of input
pub fn run(json: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_banner(&mut stdout)?;

    let mut lines = stdin.lock().lines();
    loop {
        execute!(stdout, PrintStyledContent("theory> ".bold().cyan()))?;

        let Some(line) = lines.next() else {
            // End of input: leave the prompt on its own line
            execute!(stdout, Print("\n"))?;
            return Ok(());
        };
        let line = line?;
        let trimmed = line.trim();

        match trimmed {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "help" => {
                execute!(stdout, Print(HELP))?;
                continue;
            }
            _ => {}
        }

        debug!(query = trimmed, "evaluating");
        match query::answer(trimmed) {
            Ok(answer) => match answer.render(json) {
                Ok(text) => execute!(stdout, Print(text), Print("\n"))?,
                Err(e) => print_error(&mut stdout, &e.to_string())?,
            },
            Err(e) => print_error(&mut stdout, &e.to_string())?,
        }
    }
}

fn print_banner(stdout: &mut io::Stdout) -> io::Result<()> {
    execute!(
        stdout,
        PrintStyledContent("clitheory - interactive prompt\n".bold()),
        Print("─────────────────────────────────\n"),
        Print("Type a query, `help` for examples, `quit` to leave.\n\n")
    )?;
    stdout.flush()
}

fn print_error(stdout: &mut io::Stdout, message: &str) -> io::Result<()> {
    execute!(
        stdout,
        PrintStyledContent("error: ".red().bold()),
        PrintStyledContent(message.red()),
        Print("\n")
    )
}

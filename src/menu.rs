// menu.rs - 交互式命令菜单

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::sequence_db::SequenceDb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert,
    Get,
    Find,
    Overlap,
    Exit,
}

impl Command {
    /// Single-letter menu choice, case-insensitive.
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.to_ascii_uppercase().as_str() {
            "I" => Some(Command::Insert),
            "G" => Some(Command::Get),
            "F" => Some(Command::Find),
            "O" => Some(Command::Overlap),
            "E" => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Menu loop over any line source and sink.
pub struct Menu<'a, R: BufRead, W: Write> {
    db: &'a mut SequenceDb,
    input: R,
    output: W,
    minimum_overlap: usize,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db: &'a mut SequenceDb, input: R, output: W, minimum_overlap: usize) -> Self {
        Menu {
            db,
            input,
            output,
            minimum_overlap,
        }
    }

    /// Run until `E` is chosen or the input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            let keep_going = match Command::parse(&choice) {
                Some(command) => {
                    debug!("Menu command {:?}", command);
                    self.execute(command)?
                }
                None => {
                    writeln!(self.output, "ERROR - Invalid choice: [{}]", choice)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "DNA Sequence Database")?;
        writeln!(self.output, "---------------------")?;
        writeln!(self.output, "I - Insert sequence")?;
        writeln!(self.output, "G - Get sequence")?;
        writeln!(self.output, "F - Find sequence")?;
        writeln!(self.output, "O - Overlap sequence")?;
        writeln!(self.output, "E - Exit")?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    // None on end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    // Returns false when the loop should stop.
    fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Insert => {
                let Some(sequence) = self.prompt("Insert Sequence: ")? else {
                    return Ok(false);
                };
                match self.db.insert(&sequence) {
                    Ok((result, id)) => writeln!(
                        self.output,
                        "Insert result:[{}] Sequence:[{}] ID:[{}]",
                        result, sequence, id
                    )?,
                    Err(e) => writeln!(self.output, "ERROR - {}", e)?,
                }
            }
            Command::Get => {
                let Some(id) = self.prompt("Get Sequence from ID: ")? else {
                    return Ok(false);
                };
                match self.db.get(&id) {
                    Ok(sequence) => {
                        writeln!(self.output, "Get result:[{}] for ID:[{}]", sequence, id)?
                    }
                    Err(e) => writeln!(self.output, "ERROR - {}", e)?,
                }
            }
            Command::Find => {
                let Some(sample) = self.prompt("Find sequence from sample: ")? else {
                    return Ok(false);
                };
                match self.db.find(&sample) {
                    Ok(ids) => writeln!(
                        self.output,
                        "Find result: [{}] from Sample:[{}]",
                        ids.join(", "),
                        sample
                    )?,
                    Err(e) => writeln!(self.output, "ERROR - {}", e)?,
                }
            }
            Command::Overlap => {
                let Some(sample) = self.prompt("Overlap sample: ")? else {
                    return Ok(false);
                };
                let Some(id) = self.prompt("Overlap sequence id: ")? else {
                    return Ok(false);
                };
                match self.db.overlap(&sample, &id, self.minimum_overlap) {
                    Ok(is_overlap) => writeln!(
                        self.output,
                        "Overlap result:[{}] for Sample:[{}] and ID:[{}]",
                        is_overlap, sample, id
                    )?,
                    Err(e) => writeln!(self.output, "ERROR - {}", e)?,
                }
            }
            Command::Exit => {
                writeln!(self.output, "Exiting...To the next!")?;
                return Ok(false);
            }
        }
        Ok(true)
    }
}

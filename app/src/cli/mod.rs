use clap::{Parser, Subcommand};

pub mod decode;

#[derive(Parser, Debug)]
#[command(name = "sb-link")]
#[command(about = "Decode proxy share links into outbound descriptors")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode links given as arguments, or one per line on stdin. Example:
    /// sb-link decode 'vmess://eyJhZGQiOi...#node'
    Decode(decode::DecodeArgs),
}

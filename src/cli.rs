use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "blockstage-rs",
    about = "Block program studio: assemble palette blocks in order, print their generated code, or run them against the stage actor."
)]
pub struct Args {
    #[arg(
        value_name = "BLOCK",
        help = "Block specs in program order, e.g. move or say{text=Hi,duration=1}."
    )]
    pub blocks: Vec<String>,

    #[arg(long, help = "Print the generated source for the program instead of running it.")]
    pub code: bool,

    #[arg(long, help = "List every palette block, then exit.")]
    pub list_blocks: bool,

    #[arg(
        long,
        value_name = "CATEGORY",
        help = "Restrict --list-blocks to one category tab (Games, Events, Motion, Looks, Control)."
    )]
    pub category: Option<String>,

    #[arg(long, help = "Print every stage change to stderr while the program runs.")]
    pub trace: bool,
}

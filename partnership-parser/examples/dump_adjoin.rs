use partnership_parser::{adjoin, Tag};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filename = std::env::args().nth(1).ok_or("filename argument")?;
    let unparsed_file = std::fs::read_to_string(filename)?;

    let (journal, unannotated) = adjoin(&unparsed_file, Tag::Partnership)?;
    dbg!(journal.virtual_postings().collect::<Vec<_>>());
    dbg!(unannotated);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        println!("Error: {}", e);
    }
}

mod common;

use common::get_provider;
use quantra::Quantra;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let quantra = Quantra::builder()
        .with_data_provider(get_provider())
        .build()?;

    // A scripted exchange with the data assistant. Each session keeps its
    // own transcript, so replies like "what did you just say" work.
    let mut session = quantra.chat("Ada");
    let script = [
        "Hi!",
        "How about you?",
        "start date: 1/4/2021, end date: 1/6/2021, gsid: 2",
        "row 2",
        "multiple rows: 1 3",
        "What did you just say?",
    ];

    for message in script {
        println!("> {message}");
        let reply = session.send(message).await?;
        println!("{reply}\n");
    }

    Ok(())
}

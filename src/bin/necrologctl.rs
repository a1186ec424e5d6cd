//! Post a single event to a necrolog ingestion endpoint

use clap::Parser;
use necrolog::poster::{post, PostArgs};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = PostArgs::parse();

    let request = match args.request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("[error] {}", e);
            return ExitCode::FAILURE;
        }
    };

    match post(&args.endpoint, &request).await {
        Ok(body) => {
            println!("[necrologctl] response: {}", body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[error] failed to send request: {}", e);
            ExitCode::FAILURE
        }
    }
}

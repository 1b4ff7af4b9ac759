//! Movie listing example.
//!
//! This example authenticates with The One API, prints every movie page by
//! page, and then the first page of quotes for the first movie.
//!
//! Run with: cargo run --example list_movies -- <api-token>
//! or:       THEONEAPI_EMAIL=.. THEONEAPI_PASSWORD=.. cargo run --example list_movies

use futures_util::StreamExt;
use theoneapi_rs::{ClientConfig, Movie, QueryParams, TheOneApiClient};

#[tokio::main]
async fn main() -> theoneapi_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = match std::env::args().nth(1) {
        Some(token) => TheOneApiClient::with_token(token, ClientConfig::default())?,
        None => {
            let email = std::env::var("THEONEAPI_EMAIL").unwrap_or_default();
            let password = std::env::var("THEONEAPI_PASSWORD").unwrap_or_default();
            TheOneApiClient::login(email, password).await?
        }
    };

    if !client.is_authenticated().await {
        println!("Not authenticated ({:?}); requests will likely be rejected", client.login_outcome());
    }

    let mut first_movie = None;
    let mut pages = client.paginated_get_request("/v2/movie", Some(QueryParams::new().limit(3)));

    while let Some(page) = pages.next().await {
        let page = page?;
        println!("\nPage {:?} of {:?}:", page.page(), page.pages());

        for movie in page.docs_as::<Movie>()? {
            println!(
                "  - {} ({} min)",
                movie.name,
                movie.runtime_in_minutes.unwrap_or_default()
            );
            first_movie.get_or_insert(movie.id);
        }
    }

    if let Some(id) = first_movie {
        let quotes = client.movies().quotes(&id, Some(QueryParams::new().limit(5))).await?;
        println!("\n{} quotes from {}, first five:", quotes.total().unwrap_or_default(), id);
        for quote in quotes.docs() {
            println!("  \"{}\"", quote["dialog"].as_str().unwrap_or_default());
        }
    }

    println!("\nDone!");
    Ok(())
}

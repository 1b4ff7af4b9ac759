//! Movies service for `/v2/movie` and its sub-resources.

use std::sync::Arc;

use crate::client::{ClientInner, PageStream};
use crate::models::{Fetched, MovieId, Page, QueryParams};
use crate::Result;

/// Path of the movie collection.
const MOVIES_PATH: &str = "/v2/movie";

/// Service for movie operations.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use theoneapi_rs::{Movie, MovieId, QueryParams};
///
/// # async fn example(client: theoneapi_rs::TheOneApiClient) -> theoneapi_rs::Result<()> {
/// // First page of movies, decoded into typed models
/// let page = client.movies().list(None).await?;
/// for movie in page.docs_as::<Movie>()? {
///     println!("{}: {:?} minutes", movie.name, movie.runtime_in_minutes);
/// }
///
/// // Every quote from one movie, ten per page
/// let id = MovieId::new("5cd95395de30eff6ebccde5d");
/// let mut quotes = client
///     .movies()
///     .quotes_stream(&id, Some(QueryParams::new().limit(10).sort("dialog:asc")));
/// while let Some(page) = quotes.next().await {
///     println!("{} quotes", page?.docs().len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct MoviesService {
    inner: Arc<ClientInner>,
}

impl MoviesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List movies (one page).
    pub async fn list(&self, params: Option<QueryParams>) -> Result<Page> {
        self.inner.get_request(MOVIES_PATH, params.as_ref()).await
    }

    /// Stream every page of the movie list.
    pub fn list_stream(&self, params: Option<QueryParams>) -> PageStream {
        PageStream::new(self.inner.clone(), MOVIES_PATH, params)
    }

    /// Get one movie by ID.
    pub async fn get(&self, movie_id: &MovieId, params: Option<QueryParams>) -> Result<Page> {
        self.inner
            .get_request(&movie_path(movie_id), params.as_ref())
            .await
    }

    /// Stream the pages of a single-movie response.
    pub fn get_stream(&self, movie_id: &MovieId, params: Option<QueryParams>) -> PageStream {
        PageStream::new(self.inner.clone(), &movie_path(movie_id), params)
    }

    /// Get the quotes of a movie (one page).
    pub async fn quotes(&self, movie_id: &MovieId, params: Option<QueryParams>) -> Result<Page> {
        self.inner
            .get_request(&quotes_path(movie_id), params.as_ref())
            .await
    }

    /// Stream every page of a movie's quotes.
    pub fn quotes_stream(&self, movie_id: &MovieId, params: Option<QueryParams>) -> PageStream {
        PageStream::new(self.inner.clone(), &quotes_path(movie_id), params)
    }

    pub(crate) async fn fetch_list(
        &self,
        paginated: bool,
        params: Option<QueryParams>,
    ) -> Result<Fetched> {
        if paginated {
            return Ok(Fetched::Pages(self.list_stream(params)));
        }
        Ok(Fetched::Page(self.list(params).await?))
    }

    pub(crate) async fn fetch_one(
        &self,
        movie_id: &MovieId,
        paginated: bool,
        params: Option<QueryParams>,
    ) -> Result<Fetched> {
        if paginated {
            return Ok(Fetched::Pages(self.get_stream(movie_id, params)));
        }
        Ok(Fetched::Page(self.get(movie_id, params).await?))
    }

    pub(crate) async fn fetch_quotes(
        &self,
        movie_id: &MovieId,
        paginated: bool,
        params: Option<QueryParams>,
    ) -> Result<Fetched> {
        if paginated {
            return Ok(Fetched::Pages(self.quotes_stream(movie_id, params)));
        }
        Ok(Fetched::Page(self.quotes(movie_id, params).await?))
    }
}

fn movie_path(movie_id: &MovieId) -> String {
    format!("{}/{}", MOVIES_PATH, movie_id)
}

fn quotes_path(movie_id: &MovieId) -> String {
    format!("{}/{}/quote", MOVIES_PATH, movie_id)
}

//! Fetches the three dataset files.
//!
//! All three requests run concurrently and are joined all-or-nothing: the
//! first failure aborts the load and nothing is kept.

use futures::future::try_join3;
use gloo_net::http::Request;

use crate::config::DatasetSources;
use crate::error::LoadError;
use crate::model::{DatasetKind, Datasets, RawNode};

pub async fn load_all(sources: &DatasetSources) -> Result<Datasets, LoadError> {
    let started = js_sys::Date::now();
    log::info!("loading {} datasets", DatasetKind::ALL.len());
    let (kickstarter, movies, video_games) = try_join3(
        fetch_dataset(DatasetKind::Kickstarter, sources.url(DatasetKind::Kickstarter)),
        fetch_dataset(DatasetKind::Movies, sources.url(DatasetKind::Movies)),
        fetch_dataset(DatasetKind::VideoGames, sources.url(DatasetKind::VideoGames)),
    )
    .await?;
    log::info!(
        "datasets loaded in {:.0}ms",
        js_sys::Date::now() - started
    );
    Ok(Datasets {
        kickstarter,
        movies,
        video_games,
    })
}

async fn fetch_dataset(kind: DatasetKind, url: &str) -> Result<RawNode, LoadError> {
    let dataset = kind.key();
    let response = Request::get(url)
        .send()
        .await
        .map_err(|source| LoadError::Network { dataset, source })?;
    if !response.ok() {
        return Err(LoadError::Status {
            dataset,
            status: response.status(),
        });
    }
    let text = response
        .text()
        .await
        .map_err(|source| LoadError::Network { dataset, source })?;
    let tree = parse_dataset(kind, &text)?;
    log::debug!("{}: {} records", dataset, tree.leaf_count());
    Ok(tree)
}

pub fn parse_dataset(kind: DatasetKind, text: &str) -> Result<RawNode, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        dataset: kind.key(),
        source,
    })
}

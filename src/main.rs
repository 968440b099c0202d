use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use photoloop::api::{Api, JsonPlaceholderApi, Remote};
use photoloop::cli::{Args, Command};
use photoloop::config::Config;
use photoloop::data_provider::{
    AsyncImageDataProvider, ListDataProvider, PhotoDetailDataProvider,
};
use photoloop::logging::init_tracing;
use photoloop::persistence::{
    CacheStore, DiskStore, ImagePersister, MemoryStore, PersistenceError, Persister,
};
use photoloop::ui::async_image::{AsyncImageIntent, AsyncImageStatus, AsyncImageViewModel};
use photoloop::ui::list::{ListIntent, ListStatus, ListViewModel};
use photoloop::ui::mvi::LoopError;
use photoloop::ui::photo_detail::{PhotoDetailIntent, PhotoDetailStatus, PhotoDetailViewModel};

/// How long a command waits for its cache write before exiting without it.
const PERSIST_GRACE: Duration = Duration::from_secs(5);

struct Services {
    api: Arc<dyn Api>,
    store: Arc<dyn CacheStore>,
    thumbnail_window: usize,
}

impl Services {
    fn list_provider(&self) -> Arc<ListDataProvider> {
        Arc::new(ListDataProvider::new(
            Arc::clone(&self.api),
            Persister::new(Arc::clone(&self.store)),
        ))
    }

    fn image_provider(&self) -> Arc<AsyncImageDataProvider> {
        Arc::new(AsyncImageDataProvider::new(
            Arc::clone(&self.api),
            ImagePersister::new(Arc::clone(&self.store)),
        ))
    }

    fn detail_provider(&self) -> Arc<PhotoDetailDataProvider> {
        Arc::new(PhotoDetailDataProvider::new(
            Arc::clone(&self.api),
            Persister::new(Arc::clone(&self.store)),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let services = build_services(&args, &config)?;

    tokio::select! {
        result = run(&args.command, &services) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    }
}

fn build_services(args: &Args, config: &Config) -> anyhow::Result<Services> {
    let remote = Remote::new(&config.api).context("failed to build HTTP client")?;
    let api: Arc<dyn Api> = Arc::new(JsonPlaceholderApi::new(remote, config.api.base_url.clone()));

    let store: Arc<dyn CacheStore> = if args.memory_cache {
        tracing::info!("using in-memory cache");
        Arc::new(MemoryStore::new())
    } else {
        let root: PathBuf = args
            .cache_dir
            .clone()
            .or_else(|| config.cache.dir.clone())
            .unwrap_or_else(DiskStore::default_root);
        tracing::info!(root = %root.display(), "using disk cache");
        Arc::new(DiskStore::new(root))
    };

    Ok(Services {
        api,
        store,
        thumbnail_window: config.list.thumbnail_window,
    })
}

async fn run(command: &Command, services: &Services) -> anyhow::Result<()> {
    match command {
        Command::List => run_list(services).await,
        Command::Detail { photo_id } => run_detail(services, *photo_id).await,
        Command::Image { url } => run_image(services, url).await,
    }
}

async fn settle<S, F>(label: &str, wait: F) -> anyhow::Result<S>
where
    F: Future<Output = Result<S, LoopError>>,
{
    wait.await.with_context(|| format!("{} loop stopped early", label))
}

/// Wait for the loop to confirm its cache write.
///
/// Persist failures emit no event, so the wait is bounded and a timeout
/// only costs the cache entry.
async fn await_persist<S, E, F>(label: &str, wait: F) -> anyhow::Result<()>
where
    E: std::error::Error + Send + Sync + 'static,
    F: Future<Output = Result<S, E>>,
{
    match tokio::time::timeout(PERSIST_GRACE, wait).await {
        Ok(result) => result
            .map(|_| ())
            .with_context(|| format!("{} cache write could not be confirmed", label)),
        Err(_) => {
            tracing::warn!(screen = label, "cache write did not finish, exiting without it");
            Ok(())
        }
    }
}

/// Log a one-line summary of every state the loop publishes.
fn log_snapshots<S>(
    screen: &'static str,
    mut states: watch::Receiver<S>,
    describe: fn(&S) -> String,
) -> JoinHandle<()>
where
    S: Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            let line = describe(&states.borrow_and_update());
            tracing::info!(screen, "{}", line);
            if states.changed().await.is_err() {
                break;
            }
        }
    })
}

async fn run_list(services: &Services) -> anyhow::Result<()> {
    let view_model = ListViewModel::new(
        services.list_provider(),
        services.image_provider(),
        services.thumbnail_window,
    );
    let logger = log_snapshots("list", view_model.subscribe(), |s| {
        format!(
            "status={} elements={} thumbnails={}",
            s.status.name(),
            s.elements.len(),
            s.thumbnails.len()
        )
    });

    let state = settle(
        "list",
        view_model.wait_for(|s| s.status != ListStatus::Loading),
    )
    .await?;
    if state.status == ListStatus::Error {
        return Err(anyhow!("failed to load the photo list"));
    }
    tracing::info!(elements = state.elements.len(), status = state.status.name(), "list ready");

    if !state.elements.is_empty() {
        view_model.send(ListIntent::CellAppeared(0));
        let state = settle(
            "list",
            view_model.wait_for(|s| {
                !s.thumbnails.is_empty()
                    && matches!(s.status, ListStatus::Loaded | ListStatus::Persisted)
            }),
        )
        .await?;
        let decoded = state
            .thumbnails
            .values()
            .filter(|thumbnail| thumbnail.image.is_some())
            .count();
        tracing::info!(
            requested = state.thumbnails.len(),
            decoded,
            "first thumbnail window loaded"
        );

        for element in state.elements.iter().take(services.thumbnail_window) {
            let marker = if element.is_favourite { "*" } else { " " };
            println!("{} {:>5}  {}", marker, element.id, element.title);
        }
    }

    await_persist(
        "list",
        view_model.wait_for(|s| s.status == ListStatus::Persisted),
    )
    .await?;
    logger.abort();
    Ok(())
}

async fn run_detail(services: &Services, photo_id: u64) -> anyhow::Result<()> {
    let elements = services
        .list_provider()
        .fetch_metadata()
        .await
        .context("failed to load the photo list")?;
    let element = elements
        .into_iter()
        .find(|element| element.id == photo_id)
        .ok_or_else(|| anyhow!("no photo with id {}", photo_id))?;

    let view_model = PhotoDetailViewModel::new(element, services.detail_provider());
    let logger = log_snapshots("photo_detail", view_model.subscribe(), |s| {
        format!("status={} favourite={}", s.status.name(), s.is_favourite())
    });
    view_model.send(PhotoDetailIntent::OnAppear);

    let state = settle(
        "photo_detail",
        view_model.wait_for(|s| {
            matches!(
                s.status,
                PhotoDetailStatus::Loaded(_)
                    | PhotoDetailStatus::Persisted(_)
                    | PhotoDetailStatus::NotLoaded
            )
        }),
    )
    .await?;

    let detail = state
        .detail()
        .map_err(|_| anyhow!("failed to load details for photo {}", photo_id))?;
    if matches!(state.status, PhotoDetailStatus::Loaded(_)) {
        await_persist(
            "photo_detail",
            view_model.wait_for(|s| matches!(s.status, PhotoDetailStatus::Persisted(_))),
        )
        .await?;
    }
    logger.abort();
    tracing::info!(photo_id, status = state.status.name(), "photo detail ready");
    println!("{}", detail.title);
    println!("  author:   {}", detail.author);
    println!("  comments: {}", detail.number_of_comments);
    println!("  url:      {}", detail.photo_url);
    Ok(())
}

async fn run_image(services: &Services, url: &str) -> anyhow::Result<()> {
    let view_model = AsyncImageViewModel::new(url, services.image_provider());
    let logger = log_snapshots("async_image", view_model.subscribe(), |s| {
        format!("status={} url={}", s.status.name(), s.url)
    });
    view_model.send(AsyncImageIntent::OnAppear);

    let state = settle(
        "async_image",
        view_model.wait_for(|s| {
            matches!(
                s.status,
                AsyncImageStatus::Loaded(_) | AsyncImageStatus::Failed(_)
            )
        }),
    )
    .await?;

    let image = state
        .image()
        .map_err(|_| anyhow!("image at {} could not be loaded", url))?;
    await_persist("async_image", wait_until_cached(services.store.as_ref(), url)).await?;
    logger.abort();
    tracing::info!(url, width = image.width(), height = image.height(), "image ready");
    println!("{}x{} ({} bytes)", image.width(), image.height(), image.bytes().len());
    Ok(())
}

/// Resolves once the cache holds an entry for `key`.
///
/// The image loop has no persisted status, so the store is polled.
async fn wait_until_cached(store: &dyn CacheStore, key: &str) -> Result<(), PersistenceError> {
    let mut poll = tokio::time::interval(Duration::from_millis(20));
    loop {
        poll.tick().await;
        if store.get(key).await?.is_some() {
            return Ok(());
        }
    }
}

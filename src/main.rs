use api::App;
use core::future::Future;
use db::{Config, Database, NoTls, Store};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{
    convert::Infallible,
    env, io,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, runtime::Runtime, sync::watch, task::JoinSet};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port = env::var("PORT")?.parse()?;
    let user = env::var("PG_USERNAME")?;
    let pass = env::var("PG_PASSWORD")?;
    let host = env::var("PG_HOSTNAME")?;
    let data = env::var("PG_DATABASE")?;
    let pg_port = match env::var("PG_PORT") {
        Ok(pg_port) => pg_port.parse()?,
        _ => 5432,
    };

    // Connect to the database
    let runtime = Runtime::new()?;
    let db = runtime.block_on(async {
        let (client, conn) =
            Config::new().user(&user).password(&pass).host(&host).dbname(&data).port(pg_port).connect(NoTls).await?;
        tokio::spawn(async move {
            if let Err(err) = conn.await {
                log::error!("database connection closed: {err}");
            }
        });
        anyhow::Ok(Database::from(client))
    })?;
    log::info!("connected to database {data} at {host}:{pg_port}");

    let app = Arc::new(App::from(db));
    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
    runtime.block_on(async move {
        let listener = TcpListener::bind(addr).await?;
        log::info!("listening on {addr}");
        serve(listener, app, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("cannot listen for the interrupt signal: {err}");
            }
        })
        .await?;
        anyhow::Ok(())
    })
}

/// Accepts connections until `stop` resolves, then waits for every open connection to wind down.
/// Requests already in progress are answered; idle keep-alive connections are closed.
async fn serve<S, F>(listener: TcpListener, app: Arc<App<S>>, stop: F) -> io::Result<()>
where
    S: Store + 'static,
    F: Future<Output = ()>,
{
    let (stopping, _) = watch::channel(false);
    let mut connections = JoinSet::new();

    tokio::pin!(stop);
    loop {
        let (stream, peer) = tokio::select! {
            biased;
            _ = &mut stop => break,
            Some(_) = connections.join_next(), if !connections.is_empty() => continue,
            conn = listener.accept() => conn?,
        };

        let app = app.clone();
        let mut shutdown = stopping.subscribe();
        connections.spawn(async move {
            let service = service_fn(move |req| {
                let app = app.clone();
                async move { Ok::<_, Infallible>(app.try_respond(req).await) }
            });
            let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
            tokio::pin!(conn);

            let mut draining = false;
            loop {
                tokio::select! {
                    result = conn.as_mut() => {
                        if let Err(err) = result {
                            log::error!("failed to serve connection from {peer}: {err}");
                        }
                        break;
                    }
                    _ = shutdown.changed(), if !draining => {
                        draining = true;
                        conn.as_mut().graceful_shutdown();
                    }
                }
            }
        });
    }

    drop(listener);
    log::info!("shutting down with {} open connections", connections.len());
    stopping.send_replace(true);
    while connections.join_next().await.is_some() {}
    Ok(())
}

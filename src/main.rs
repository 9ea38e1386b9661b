/*
 * Mentorship project
 *
 * Permission is hereby granted, free of charge, to any person obtaining
 * a copy of this software and associated documentation files (the “Software”),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included
 * in all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS
 * OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use clap::Parser;
use log::{error, info};
use mentorship::args::{Args, StoreKind};
use mentorship::handler::route::configure;
use mentorship::state::state::State;
use mentorship::state::store::Store;
use mentorship::state::store_local::StoreLocal;
use mentorship::state::store_mongo::StoreMongo;
use std::sync::Arc;

async fn open_store(args: &Args) -> std::io::Result<Arc<dyn Store>> {
    let res: Result<Arc<dyn Store>, _> = match args.store {
        StoreKind::Mongo => StoreMongo::connect(&args.db_url, &args.db_name)
            .await
            .map(|s| Arc::new(s) as Arc<dyn Store>),
        StoreKind::Local => StoreLocal::connect(&args.data_path).map(|s| Arc::new(s) as Arc<dyn Store>),
    };
    res.map_err(|e| {
        error!("Failed to open {:?} store: {}", args.store, e);
        std::io::Error::other(e)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let state = State::new(open_store(&args).await?);
    let data = Data::new(state.clone());

    info!("Starting server on {}:{}", args.bind, args.port);
    let res = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await;

    state.close().await;
    info!("Server stopped");
    res
}

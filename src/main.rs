use lambda_runtime::{run, service_fn, Error};

mod env;
mod handler;
mod logger;
mod response;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::log_startup();

    // The platform owns the event loop; one handler call per invocation.
    run(service_fn(handler::probe)).await
}

// demos/inspect.rs
//! Print the structure of a UDF container.
//!
//! ```text
//! cargo run --example inspect -- scene.udf [table]
//! RUST_LOG=udf_rs=debug cargo run --example inspect --features http -- https://host/scene.udf
//! ```

use tracing_subscriber::EnvFilter;
use udf_rs::display::describe_dataset;
use udf_rs::*;

async fn open(location: &str) -> Result<Box<dyn ByteRangeSource>> {
    #[cfg(feature = "http")]
    if location.starts_with("http://") || location.starts_with("https://") {
        return Ok(Box::new(CachedSource::new(HttpSource::new(location)?)));
    }
    Ok(Box::new(FileSource::open(location).await?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(location) = args.next() else {
        eprintln!("usage: inspect <file-or-url> [table]");
        std::process::exit(2);
    };
    let table_name = args.next();

    let reader = UdfReader::new(open(&location).await?);
    let (file, root) = reader.read_root().await?;
    println!("file {} root {} next {:#x}", file.id, file.root, file.next);
    print!("{}", describe_dataset(&root));

    for table in root.tables.iter().filter(|t| t.type_info.hint == TypeHint::Dataset) {
        for child in reader.read_child_datasets(table).await? {
            print!("{}", describe_dataset(&child));
        }
    }

    if let Some(name) = table_name {
        match reader.read_table(&root, &name).await? {
            Some(TypedValue::Text(text)) => println!("{name} = {text:?}"),
            Some(TypedValue::Json(value)) => println!("{name} = {value:#}"),
            Some(value) => println!("{name}: {} with {} items\n{value:?}", value.type_name(), value.len()),
            None => eprintln!("no table named {name}"),
        }
    }

    Ok(())
}

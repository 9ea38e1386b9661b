use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// MongoDB server
    Mongo,
    /// In-process store, optionally mirrored to --data-path
    Local,
}

/// Mentor/student assignment backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Database URL
    #[arg(long, env = "DB_URL", default_value("mongodb://127.0.0.1:27017"))]
    pub db_url: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value("mentorship"), visible_alias("database"))]
    pub db_name: String,

    /// Storage backend
    #[arg(long, env = "STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// Data path for the local store
    #[arg(long, env = "DATA_PATH", default_value(""))]
    pub data_path: String,

    /// Listen address
    #[arg(long, env = "BIND", default_value("127.0.0.1"))]
    pub bind: String,

    /// Port number
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
}

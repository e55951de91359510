pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://seat_booking.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 2;
pub const DEV_JWT_SECRET: &str = "super-secret-change-me";
pub const DEFAULT_GUEST_USERNAME: &str = "guest";
pub const DEFAULT_GRID_ROWS: &str = "ABCDE";
pub const DEFAULT_GRID_COLUMNS: i64 = 5;

/// Porcentaje de impuestos aplicado sobre el subtotal.
pub const TAX_RATE: f64 = 0.08;
/// Costo fijo de envío para carritos no vacíos.
pub const DELIVERY_FEE: f64 = 5.00;
pub const CURRENCY_SYMBOL: &str = "$";

/// Cantidad mínima de una línea del carrito.
pub const MIN_LINE_QUANTITY: u32 = 1;

/// Ventana de entrega estimada para pedidos nuevos (minutos desde ahora).
pub const MIN_DELIVERY_MINUTES: i64 = 25;
pub const MAX_DELIVERY_MINUTES: i64 = 45;
pub const DELIVERY_WINDOW_MINUTES: i64 = 15;

pub const ORDER_ID_PREFIX: &str = "order";
pub const DEFAULT_CUSTOMER_NAME: &str = "guest";

pub const CATALOG_PATH_ENV: &str = "FOODDASH_CATALOG";
pub const LOG_LEVEL_ENV: &str = "FOODDASH_LOG";

// ABOUTME: Application constants for store keys, leases, pagination, and Redis connections
// ABOUTME: Defaults consumed by configuration loading and the recipe core components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identity used in logs
pub mod service {
    /// Service name reported at startup
    pub const SERVICE_NAME: &str = "recipe-server";

    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;

    /// Overall request timeout applied by the transport layer
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Recipe core constants
pub mod recipes {
    /// Counter record that backs recipe id generation
    pub const ID_COUNTER_KEY: &str = "idGeneratorForRecipes";

    /// Lease duration for read-modify-write cycles, in seconds
    pub const DEFAULT_LEASE_SECS: u64 = 3;

    /// Longest lease a configured writer may hold, in seconds
    pub const MAX_LEASE_SECS: u64 = 30;

    /// Search threshold used when the caller supplies none; large enough to select everything
    pub const DEFAULT_MAX_PREP_TIME: f32 = 9999.99;

    /// Resource name used in not-found messages
    pub const RESOURCE_NAME: &str = "Recipe";
}

/// Pagination bounds enforced by request handlers
pub mod pagination {
    /// Smallest page a handler passes to the query engine
    pub const MIN_PAGE_SIZE: usize = 1;

    /// Largest page a handler passes to the query engine; also the fallback
    pub const MAX_PAGE_SIZE: usize = 10;
}

/// Store key layout
pub mod store {
    /// Namespace prefix for every key the server writes
    pub const DEFAULT_KEY_PREFIX: &str = "recipes:";

    /// Keys fetched per round trip when a query walks the collection
    pub const QUERY_BATCH_SIZE: usize = 100;
}

/// Redis connection defaults
pub mod redis {
    /// Connection timeout in seconds
    pub const CONNECTION_TIMEOUT_SECS: u64 = 5;

    /// Response timeout in seconds
    pub const RESPONSE_TIMEOUT_SECS: u64 = 3;

    /// Reconnection attempts after a dropped connection
    pub const RECONNECTION_RETRIES: usize = 3;

    /// Exponential backoff base
    pub const RETRY_EXPONENT_BASE: u64 = 2;

    /// Upper bound on a single retry delay in milliseconds
    pub const MAX_RETRY_DELAY_MS: u64 = 5_000;

    /// Attempts for the initial connection at startup
    pub const INITIAL_CONNECTION_RETRIES: u32 = 5;

    /// First retry delay in milliseconds (doubles on each attempt)
    pub const INITIAL_RETRY_DELAY_MS: u64 = 500;
}

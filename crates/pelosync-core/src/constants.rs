// ABOUTME: Application constants for remote endpoints, cache layout, and defaults
// ABOUTME: Centralizes paths and magic values shared by the sync and analysis layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Remote service endpoints
pub mod api {
    /// Production API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.onepeloton.com";

    /// Username/password login
    pub const LOGIN_PATH: &str = "/auth/login";

    /// Profile of the authenticated account
    pub const ME_PATH: &str = "/api/me";

    /// Join hints for the workout listing so ride and instructor come back embedded
    pub const WORKOUT_LIST_JOINS: &str = "ride,ride.instructor";

    /// Sampling interval requested from the performance graph endpoint
    pub const METRICS_EVERY_N: u32 = 1;

    /// Workouts listing for a user
    #[must_use]
    pub fn user_workouts(user_id: &str) -> String {
        format!("/api/user/{user_id}/workouts")
    }

    /// Single workout detail
    #[must_use]
    pub fn workout(workout_id: &str) -> String {
        format!("/api/workout/{workout_id}")
    }

    /// Per-workout performance graph (metrics)
    #[must_use]
    pub fn workout_metrics(workout_id: &str) -> String {
        format!("/api/workout/{workout_id}/performance_graph")
    }

    /// User profile by id
    #[must_use]
    pub fn user(user_id: &str) -> String {
        format!("/api/user/{user_id}")
    }

    /// Challenges the user has currently joined
    #[must_use]
    pub fn current_challenges(user_id: &str) -> String {
        format!("/api/user/{user_id}/challenges/current")
    }

    /// Single challenge for a user
    #[must_use]
    pub fn challenge(user_id: &str, challenge_id: &str) -> String {
        format!("/api/user/{user_id}/challenge/{challenge_id}")
    }
}

/// Paging defaults
pub mod paging {
    /// Page size used by the service's own web client
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Smallest accepted page size
    pub const MIN_PAGE_SIZE: usize = 1;

    /// Largest accepted page size
    pub const MAX_PAGE_SIZE: usize = 100;
}

/// Cache layout
pub mod cache {
    /// Extension of every cached entity file
    pub const FILE_EXTENSION: &str = "json";
}

/// Analysis defaults
pub mod analysis {
    /// The annual minutes challenge tracked when none is configured
    pub const DEFAULT_ANNUAL_CHALLENGE_ID: &str = "4ee56696ffcb442592607af5004503e3";
}

/// Service identity
pub mod service {
    /// Name used for logging and the User-Agent header
    pub const SERVICE_NAME: &str = "pelosync";

    /// User-Agent sent with every request
    #[must_use]
    pub fn user_agent() -> String {
        format!("{SERVICE_NAME}/{}", env!("CARGO_PKG_VERSION"))
    }
}

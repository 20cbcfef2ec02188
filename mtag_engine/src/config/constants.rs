pub mod compile_time {
    pub mod file_processing {
        /// Maximum file size allowed for processing (10MB)
        /// Bounds memory use for a single indexed file
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a file "large" (1MB)
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;

        /// Maximum line count for a single file
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = 100_000;
    }

    pub mod scanner {
        /// Maximum length accepted for a single scanned word
        /// Longer runs are still consumed but the tag name is truncated
        pub const MAX_WORD_LENGTH: usize = 255;
    }

    pub mod engine {
        /// Nesting depth at which a diagnostic is recorded. Pushes are
        /// never dropped; `end` matching requires every open to be tracked
        pub const MAX_NESTING_DEPTH: usize = 256;

        /// Maximum number of tags emitted per file
        pub const MAX_TAGS_PER_FILE: usize = 100_000;

        /// Maximum number of diagnostics retained per file
        pub const MAX_DIAGNOSTICS_PER_FILE: usize = 1_000;
    }

    pub mod batch_processing {
        /// Upper bound on batch worker threads
        pub const MAX_WORKER_THREADS: usize = 32;

        /// Maximum files accepted in one batch run
        pub const MAX_FILES_PER_BATCH: usize = 50_000;
    }

    pub mod logging {
        /// In-memory event buffer size for the memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log events retained per file context
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;
    }
}

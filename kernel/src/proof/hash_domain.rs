//! Typed domain separators for canonical hashing.
//!
//! Every production hash computation selects a domain via [`HashDomain`].
//! The enum, `as_bytes()`, `ALL`, and `Display` are generated from one list.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Result log bytes (`resultat.txt`), exactly as stored on disk.
    ResultLog => b"SERVIETTE::RESULT_LOG::V1\0",

    /// Run manifest canonical JSON bytes.
    RunManifest => b"SERVIETTE::RUN_MANIFEST::V1\0",

    /// Benchmark determinism guard.
    BenchGuard => b"SERVIETTE::BENCH_GUARD::V1\0",
}

//! Hosted-store adapters (Supabase REST interface).

mod history_store;

pub use history_store::SupabaseHistoryStore;

pub mod channel_presenter;

pub mod analyze_server;

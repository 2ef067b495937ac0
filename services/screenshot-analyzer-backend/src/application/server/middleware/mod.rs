pub mod response_map;

mod api_tests;
mod store_flow_tests;

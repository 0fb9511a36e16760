mod create_backend_tests;
mod mock_backend_tests;

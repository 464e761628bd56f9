mod client_tests;

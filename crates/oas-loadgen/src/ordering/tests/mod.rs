mod operation_tests;

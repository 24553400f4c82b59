mod token_test;

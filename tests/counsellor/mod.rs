mod listing_test;

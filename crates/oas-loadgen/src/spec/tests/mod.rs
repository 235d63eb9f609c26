mod tagger_tests;

mod line_scan_tests;

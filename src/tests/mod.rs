mod newspaper;
